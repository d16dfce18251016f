//! User service - Handles user-related business logic.
//!
//! Account creation and credential changes live in the auth service, which
//! owns password hashing.

use async_trait::async_trait;
use std::sync::Arc;

use common::AppResult;
use domain::{User, UserId};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Flag a user as a paying subscriber
    async fn mark_subscribed(&self, id: UserId) -> AppResult<User>;

    /// Remove every user
    async fn delete_all(&self) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn mark_subscribed(&self, id: UserId) -> AppResult<User> {
        let user = self.repo.mark_subscribed(id).await?;
        tracing::info!(user_id = id, "User upgraded to Chirpy Red");
        Ok(user)
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.repo.delete_all().await
    }
}
