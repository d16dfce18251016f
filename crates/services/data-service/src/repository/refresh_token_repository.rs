//! Refresh token repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};

use common::{AppError, AppResult, OptionExt};
use domain::{RefreshToken, User, UserId, DEFAULT_REFRESH_TOKEN_TTL_SECONDS, REFRESH_TOKEN_BYTES};

use crate::infra::RecordStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Refresh token repository trait.
///
/// Revoked tokens stay in the store so `lookup` keeps finding them.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Generate and store a fresh token for `user_id`
    async fn issue(&self, user_id: UserId) -> AppResult<String>;

    async fn lookup(&self, token: &str) -> AppResult<RefreshToken>;

    /// Set `revoked_at` once; `NotFound` for unknown tokens
    async fn revoke(&self, token: &str) -> AppResult<()>;

    /// Owner of an active token; `InvalidToken` otherwise
    async fn resolve_user(&self, token: &str) -> AppResult<User>;
}

pub struct RefreshTokenStore {
    store: Arc<RecordStore>,
    ttl: Duration,
}

impl RefreshTokenStore {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            ttl: Duration::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECONDS),
        }
    }

    /// Override how long issued tokens live
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// 32 random bytes from the OS, hex encoded
fn generate_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[async_trait]
impl RefreshTokenRepository for RefreshTokenStore {
    async fn issue(&self, user_id: UserId) -> AppResult<String> {
        let now = Utc::now();
        let record = RefreshToken::new(generate_token(), user_id, now, now + self.ttl);
        let token = record.token.clone();

        self.store
            .mutate(move |doc| {
                doc.refresh_tokens.insert(record.token.clone(), record);
                Ok(())
            })
            .await?;

        Ok(token)
    }

    async fn lookup(&self, token: &str) -> AppResult<RefreshToken> {
        self.store
            .read(|doc| doc.refresh_tokens.get(token).cloned().ok_or_not_found())
            .await
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        let now = Utc::now();
        self.store
            .mutate(|doc| {
                let record = doc.refresh_tokens.get_mut(token).ok_or(AppError::NotFound)?;
                record.revoke(now);
                Ok(())
            })
            .await
    }

    async fn resolve_user(&self, token: &str) -> AppResult<User> {
        let now = Utc::now();
        self.store
            .read(|doc| {
                let record = doc
                    .refresh_tokens
                    .get(token)
                    .filter(|record| record.is_active_at(now))
                    .ok_or(AppError::InvalidToken)?;

                doc.users
                    .get(&record.user_id)
                    .cloned()
                    .ok_or(AppError::InvalidToken)
            })
            .await
    }
}
