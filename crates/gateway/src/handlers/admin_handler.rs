//! Admin handlers: file server metrics and the dev reset.

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Router,
};

use common::{AppError, AppResult};

use crate::state::AppState;

/// Create admin routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/reset", post(reset))
}

/// File server hit count as an HTML page
#[utoipa::path(
    get,
    path = "/admin/metrics",
    tag = "Admin",
    responses(
        (status = 200, description = "Metrics page", body = String, content_type = "text/html")
    )
)]
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>",
        state.hits.get()
    ))
}

/// Delete all users and reset the hit counter (dev platform only)
#[utoipa::path(
    post,
    path = "/admin/reset",
    tag = "Admin",
    responses(
        (status = 200, description = "State reset"),
        (status = 403, description = "Not running on the dev platform")
    )
)]
pub async fn reset(State(state): State<AppState>) -> AppResult<(StatusCode, &'static str)> {
    if !state.config.platform.is_dev() {
        return Err(AppError::Forbidden);
    }

    state.user_service.delete_all().await?;
    state.hits.reset();
    tracing::info!("Development reset complete");

    Ok((StatusCode::OK, "Reset"))
}
