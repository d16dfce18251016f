//! Auth service configuration.

use chrono::Duration;

use common::{env_first, env_parse_or, AppError, AppResult};
use domain::{DEFAULT_ACCESS_TOKEN_TTL_SECONDS, DEFAULT_REFRESH_TOKEN_TTL_SECONDS, MIN_JWT_SECRET_LENGTH};

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Auth service configuration.
#[derive(Clone)]
pub struct AuthServiceConfig {
    /// JWT secret for signing tokens (min 32 characters)
    jwt_secret: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

// Don't expose the secret in debug output
impl std::fmt::Debug for AuthServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// `Config` if JWT_SECRET is missing in a release build or too short.
    pub fn from_env() -> AppResult<Self> {
        let jwt_secret = match env_first(&["JWT_SECRET"]) {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            None => {
                return Err(AppError::config(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Self::new(
            jwt_secret,
            Duration::seconds(env_parse_or(
                &["ACCESS_TOKEN_TTL_SECONDS"],
                DEFAULT_ACCESS_TOKEN_TTL_SECONDS,
            )),
            Duration::seconds(env_parse_or(
                &["REFRESH_TOKEN_TTL_SECONDS"],
                DEFAULT_REFRESH_TOKEN_TTL_SECONDS,
            )),
        )
    }

    /// Build a configuration, checking the secret length.
    pub fn new(
        jwt_secret: impl Into<String>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            jwt_secret,
            access_token_ttl,
            refresh_token_ttl,
        })
    }

    /// Get JWT secret.
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}
