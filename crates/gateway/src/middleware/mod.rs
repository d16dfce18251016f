//! Middleware for authentication and file server metrics.

mod auth;
mod metrics;

pub use auth::{api_key_middleware, auth_middleware, CurrentUser};
pub use metrics::{count_hits, HitCounter};
