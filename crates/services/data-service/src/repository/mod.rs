//! Repository layer for data access.

mod post_repository;
mod refresh_token_repository;
mod user_repository;

pub use post_repository::{PostRepository, PostStore};
pub use refresh_token_repository::{RefreshTokenRepository, RefreshTokenStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use post_repository::MockPostRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use refresh_token_repository::MockRefreshTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
