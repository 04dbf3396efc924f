//! HTTP transport layer - the single query/mutation endpoint and its glue.
//!
//! One POST route carries every query and mutation; everything else is CORS
//! preflight handling and structured JSON errors for unmatched routes and
//! methods. The transport never interprets results, it only forwards parsed
//! requests into [`graphql`] and serializes what comes back.

/// Request execution over the core services
pub mod graphql;
/// Minimal request document parsing
pub mod parser;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::post,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    /// Database handle, explicitly constructed in `main` and passed down
    pub db: DatabaseConnection,
    /// Whether error responses include trace detail
    pub debug: bool,
}

/// Builds the application router with CORS, request logging, and the
/// structured 404/405 fallbacks.
pub fn build_router(context: AppContext) -> Router {
    Router::new()
        .route(
            "/graphql",
            post(graphql_handler)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(context)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(log_request))
}

/// HTTP request log middleware.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

/// The single query/mutation endpoint.
///
/// The body is read as text and parsed here so a malformed body still gets a
/// structured error envelope instead of a bare rejection.
async fn graphql_handler(State(context): State<AppContext>, body: String) -> Json<Value> {
    let request = match serde_json::from_str::<graphql::GraphQLRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            return Json(json!({
                "errors": [{
                    "message": format!("Invalid JSON in request body: {e}"),
                    "extensions": { "category": "graphql" }
                }]
            }));
        }
    };

    Json(graphql::execute(&context.db, context.debug, request).await)
}

/// OPTIONS short-circuits with 200; the CORS layer adds the headers.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" })))
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method Not Allowed", "allowed": ["POST", "OPTIONS"] })),
    )
}
