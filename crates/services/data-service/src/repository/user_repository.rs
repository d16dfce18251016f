//! User repository implementation.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult, OptionExt};
use domain::{normalize_email, User, UserId};

use crate::infra::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Email comparisons ignore case and surrounding whitespace.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; `DuplicateEmail` if the address is taken
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AppResult<User>;

    /// Replace email and password hash. The returned user carries no hash.
    async fn update(&self, id: UserId, email: &str, password_hash: &str) -> AppResult<User>;

    /// Set the subscription flag
    async fn mark_subscribed(&self, id: UserId) -> AppResult<User>;

    /// Remove every user. ID allocation continues where it left off.
    async fn delete_all(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository over the record store
pub struct UserStore {
    store: Arc<RecordStore>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, email: &str, password_hash: &str) -> AppResult<User> {
        let email = email.trim().to_string();
        let password_hash = password_hash.to_string();

        self.store
            .mutate(move |doc| {
                if doc.email_taken(&email, None) {
                    return Err(AppError::DuplicateEmail);
                }

                let id = doc.allocate_user_id()?;
                let user = User::new(id, email, password_hash);
                doc.users.insert(id, user.clone());
                Ok(user)
            })
            .await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<User> {
        let email = normalize_email(email);
        self.store
            .read(|doc| doc.user_by_email(&email).cloned().ok_or_not_found())
            .await
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<User> {
        self.store
            .read(|doc| doc.users.get(&id).cloned().ok_or_not_found())
            .await
    }

    async fn update(&self, id: UserId, email: &str, password_hash: &str) -> AppResult<User> {
        let email = email.trim().to_string();
        let password_hash = password_hash.to_string();

        self.store
            .mutate(move |doc| {
                if !doc.users.contains_key(&id) {
                    return Err(AppError::NotFound);
                }
                if doc.email_taken(&email, Some(id)) {
                    return Err(AppError::DuplicateEmail);
                }

                let user = doc.users.get_mut(&id).ok_or(AppError::NotFound)?;
                user.email = email;
                user.password_hash = password_hash;
                Ok(user.clone().redacted())
            })
            .await
    }

    async fn mark_subscribed(&self, id: UserId) -> AppResult<User> {
        self.store
            .mutate(|doc| {
                let user = doc.users.get_mut(&id).ok_or(AppError::NotFound)?;
                user.is_chirpy_red = true;
                Ok(user.clone())
            })
            .await
    }

    async fn delete_all(&self) -> AppResult<()> {
        let removed = self
            .store
            .mutate(|doc| {
                let removed = doc.users.len();
                doc.users.clear();
                Ok(removed)
            })
            .await?;

        tracing::info!(removed, "Deleted all users");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use domain::Password;

    use super::*;

    async fn repo() -> UserStore {
        UserStore::new(Arc::new(RecordStore::in_memory().await.unwrap()))
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = repo().await;
        let hash = Password::new("pw1").unwrap().into_string();

        let created = repo.create(" a@x.com ", &hash).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.email, "a@x.com");

        let found = repo.find_by_email("A@X.com").await.unwrap();
        assert_eq!(found.id, 1);
        assert_ne!(found.password_hash, "pw1");
        assert_eq!(repo.find_by_id(1).await.unwrap(), found);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_case_insensitive() {
        let repo = repo().await;
        repo.create("a@x.com", "h").await.unwrap();

        let result = repo.create("  A@X.COM", "h").await;
        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_missing_user_is_not_found() {
        let repo = repo().await;
        assert!(matches!(repo.find_by_id(9).await, Err(AppError::NotFound)));
        assert!(matches!(
            repo.find_by_email("nobody@x.com").await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(
            repo.update(9, "n@x.com", "h").await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(repo.mark_subscribed(9).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_checks_other_users_only() {
        let repo = repo().await;
        repo.create("a@x.com", "h1").await.unwrap();
        repo.create("b@x.com", "h2").await.unwrap();

        // Keeping your own address is fine
        let updated = repo.update(1, "A@x.com", "h3").await.unwrap();
        assert_eq!(updated.email, "A@x.com");
        assert!(updated.password_hash.is_empty());
        assert_eq!(repo.find_by_id(1).await.unwrap().password_hash, "h3");

        let clash = repo.update(1, "b@x.com", "h4").await;
        assert!(matches!(clash, Err(AppError::DuplicateEmail)));
        assert_eq!(repo.find_by_id(1).await.unwrap().password_hash, "h3");
    }

    #[tokio::test]
    async fn test_mark_subscribed_is_idempotent() {
        let repo = repo().await;
        repo.create("a@x.com", "h").await.unwrap();

        assert!(repo.mark_subscribed(1).await.unwrap().is_chirpy_red);
        assert!(repo.mark_subscribed(1).await.unwrap().is_chirpy_red);
    }

    #[tokio::test]
    async fn test_delete_all_keeps_counter() {
        let repo = repo().await;
        repo.create("a@x.com", "h").await.unwrap();
        repo.create("b@x.com", "h").await.unwrap();

        repo.delete_all().await.unwrap();
        assert!(matches!(repo.find_by_id(1).await, Err(AppError::NotFound)));

        let next = repo.create("a@x.com", "h").await.unwrap();
        assert_eq!(next.id, 3);
    }
}
