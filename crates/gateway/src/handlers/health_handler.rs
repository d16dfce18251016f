//! Health check handlers.

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/healthz", get(health_check))
}

/// Readiness probe
#[utoipa::path(
    get,
    path = "/api/healthz",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    )
)]
pub async fn health_check() -> &'static str {
    "OK"
}
