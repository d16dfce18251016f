//! Auth Service Library
//!
//! Session management for the backend: password login, HS256 access tokens
//! and the refresh token lifecycle, on top of the data service repositories.

pub mod config;
pub mod service;

use std::sync::Arc;

use data_service_lib::DataServices;

use crate::config::AuthServiceConfig;
use crate::service::Authenticator;

/// Build the authenticator over the shared repositories.
pub fn build_authenticator(config: &AuthServiceConfig, data: &DataServices) -> Arc<Authenticator> {
    Arc::new(Authenticator::new(
        data.users.clone(),
        data.refresh_tokens.clone(),
        config.jwt_secret().to_string(),
        config.access_token_ttl,
    ))
}
