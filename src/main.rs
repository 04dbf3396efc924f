use dotenvy::dotenv;
use storefront::api::{self, AppContext};
use storefront::config::{self, Settings};
use storefront::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 3. Resolve settings from the environment
    let settings = Settings::from_env()
        .inspect_err(|e| error!("Failed to resolve settings: {}", e))?;

    // 4. Initialize database
    let db = config::database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database tables ensured."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Serve
    let app = api::build_router(AppContext {
        db,
        debug: settings.debug,
    });
    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    info!("Listening on {}", settings.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
