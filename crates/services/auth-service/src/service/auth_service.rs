//! Authentication service - the session manager.
//!
//! Handles registration, login, access token validation and the refresh
//! token lifecycle. Uses the domain credential manager for hashing.

use async_trait::async_trait;
use chrono::Duration;
use once_cell::sync::Lazy;
use std::sync::Arc;

use common::{AppError, AppResult};
use data_service_lib::repository::{RefreshTokenRepository, UserRepository};
use domain::{Password, User, UserId};

use super::token::{mint_access_token, validate_access_token};

/// Verified when the email is unknown so both failure paths cost the same.
static DUMMY_PASSWORD: Lazy<Password> = Lazy::new(|| {
    Password::new("chirpy-timing-equaliser").unwrap_or_else(|_| Password::from_hash(""))
});

/// Credentials handed out by a successful login
#[derive(Debug, Clone)]
pub struct Session {
    /// Logged-in user, without password hash
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, email: &str, password: &str) -> AppResult<User>;

    /// Check credentials and open a session.
    ///
    /// `expires_in_seconds` can only shorten the access token lifetime.
    async fn login(
        &self,
        email: &str,
        password: &str,
        expires_in_seconds: Option<i64>,
    ) -> AppResult<Session>;

    /// Verify an access token and return its user ID
    fn verify_token(&self, token: &str) -> AppResult<UserId>;

    /// Exchange a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> AppResult<String>;

    /// Revoke a refresh token
    async fn revoke(&self, refresh_token: &str) -> AppResult<()>;

    /// Replace a user's email and password
    async fn update_credentials(
        &self,
        user_id: UserId,
        email: &str,
        password: &str,
    ) -> AppResult<User>;
}

/// Concrete implementation of AuthService over the repositories.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    jwt_secret: String,
    access_ttl: Duration,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        jwt_secret: String,
        access_ttl: Duration,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            jwt_secret,
            access_ttl,
        }
    }

    /// Requested lifetime if positive and shorter than the configured one
    fn access_ttl_for(&self, requested: Option<i64>) -> Duration {
        match requested {
            Some(seconds) if seconds > 0 && seconds < self.access_ttl.num_seconds() => {
                Duration::seconds(seconds)
            }
            _ => self.access_ttl,
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, email: &str, password: &str) -> AppResult<User> {
        let password_hash = Password::new(password)?.into_string();
        let user = self.users.create(email, &password_hash).await?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(user.redacted())
    }

    async fn login(
        &self,
        email: &str,
        password: &str,
        expires_in_seconds: Option<i64>,
    ) -> AppResult<Session> {
        let user = match self.users.find_by_email(email).await {
            Ok(user) => Some(user),
            Err(AppError::NotFound) => None,
            Err(e) => return Err(e),
        };

        // Unknown emails still pay for one verification
        let verified = match &user {
            Some(user) => Password::from_hash(user.password_hash.as_str()).verify(password),
            None => DUMMY_PASSWORD.verify(password),
        };

        let user = match (user, verified) {
            (Some(user), Ok(())) => user,
            _ => return Err(AppError::InvalidCredentials),
        };

        let ttl = self.access_ttl_for(expires_in_seconds);
        let access_token = mint_access_token(user.id, &self.jwt_secret, ttl)?;
        let refresh_token = self.refresh_tokens.issue(user.id).await?;
        tracing::debug!(user_id = user.id, "Session opened");

        Ok(Session {
            user: user.redacted(),
            access_token,
            refresh_token,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<UserId> {
        validate_access_token(token, &self.jwt_secret)
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let user = self.refresh_tokens.resolve_user(refresh_token).await?;
        mint_access_token(user.id, &self.jwt_secret, self.access_ttl)
    }

    async fn revoke(&self, refresh_token: &str) -> AppResult<()> {
        self.refresh_tokens.revoke(refresh_token).await
    }

    async fn update_credentials(
        &self,
        user_id: UserId,
        email: &str,
        password: &str,
    ) -> AppResult<User> {
        let password_hash = Password::new(password)?.into_string();
        self.users.update(user_id, email, &password_hash).await
    }
}
