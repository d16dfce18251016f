//! API Gateway Library
//!
//! The HTTP surface of the backend: JSON handlers over the auth, user and
//! post services, the static file server and the admin pages.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use tower_http::trace::TraceLayer;
use tracing::info;

use common::{AppError, AppResult};

use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete application with request tracing.
pub fn build_app(state: AppState) -> axum::Router {
    create_router(state).layer(TraceLayer::new_for_http())
}

/// Serve `state` until the process is stopped.
pub async fn serve(state: AppState) -> AppResult<()> {
    let addr = state.config.bind_address();
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|e| AppError::config(format!("cannot bind {}: {}", addr, e)))?;
    info!("Chirpy listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("server error: {}", e)))
}
