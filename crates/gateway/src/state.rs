//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::service::AuthService;
use data_service_lib::service::{PostService, UserService};

use crate::config::GatewayConfig;
use crate::middleware::HitCounter;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub post_service: Arc<dyn PostService>,
    pub hits: Arc<HitCounter>,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        post_service: Arc<dyn PostService>,
        config: GatewayConfig,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            post_service,
            hits: Arc::new(HitCounter::default()),
            config,
        }
    }
}
