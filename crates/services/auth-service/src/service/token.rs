//! Access token codec (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};
use domain::{UserId, TOKEN_ISSUER};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID as a decimal string
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign an access token for `user_id` that expires after `ttl`.
pub fn mint_access_token(user_id: UserId, secret: &str, ttl: Duration) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iss: TOKEN_ISSUER.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("failed to sign access token: {}", e)))
}

/// Check signature, issuer and expiry; return the subject.
///
/// Expiry is strict: a token whose `exp` equals the current second is
/// already invalid.
pub fn validate_access_token(token: &str, secret: &str) -> AppResult<UserId> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected access token");
        AppError::InvalidToken
    })?;

    if data.claims.exp <= Utc::now().timestamp() {
        return Err(AppError::InvalidToken);
    }

    data.claims.sub.parse().map_err(|_| AppError::InvalidToken)
}
