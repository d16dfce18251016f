//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! users, posts, refresh tokens, password hashing and the content filter.

pub mod constants;
pub mod error;
pub mod password;
pub mod post;
pub mod refresh_token;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use post::{censor, clean_body, Post, PostId, SortOrder};
pub use refresh_token::RefreshToken;
pub use user::{normalize_email, User, UserId, UserResponse};
