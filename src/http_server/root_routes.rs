//! Root HTTP Route

use axum::{routing::get, Router};

/// Greeting served at `/`
pub const GREETING: &str = "Hello World!";

/// Create root routes
pub fn root_routes() -> Router {
    Router::new().route("/", get(hello))
}

/// Plain-text greeting
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", content_type = "text/plain", body = String),
    ),
)]
pub async fn hello() -> &'static str {
    GREETING
}
