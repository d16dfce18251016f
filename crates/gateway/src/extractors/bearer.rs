//! Bearer credential extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use common::AppError;

/// Raw token from `Authorization: Bearer <token>`.
///
/// Used directly by the refresh endpoints, where the bearer is an opaque
/// refresh token rather than a JWT.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized)?;

        let token = bearer.token().trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        Ok(BearerToken(token.to_string()))
    }
}
