//! One-shot catalog loader: reads a JSON document and imports it into the
//! database the server reads from.
//!
//! Usage: `import_data [path]` (defaults to `data/data.json`). Exits with a
//! non-zero status when the import report carries errors.

use dotenvy::dotenv;
use storefront::config::{self, Settings};
use storefront::core::import;
use storefront::errors::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/data.json".to_string());

    let settings = Settings::from_env()?;
    let db = config::database::create_connection(&settings.database_url)
        .await
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    config::database::create_tables(&db).await?;

    println!("Starting import from: {path}");
    println!("----------------------------------------");

    let report = import::import_file(&db, &path).await;

    println!("Import completed!");
    println!("Categories imported: {}", report.categories_count);
    println!("Products imported: {}", report.products_count);
    println!("Attributes imported: {}", report.attributes_count);

    if !report.errors.is_empty() {
        println!("\nErrors:");
        for message in &report.errors {
            println!("  - {message}");
        }
        std::process::exit(1);
    }

    Ok(())
}
