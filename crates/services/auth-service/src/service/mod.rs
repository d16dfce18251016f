//! Authentication service business logic.

mod auth_service;
mod token;

pub use auth_service::{AuthService, Authenticator, Session};
pub use token::{mint_access_token, validate_access_token, Claims};
