//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use subtle::ConstantTimeEq;

use common::{AppError, AppResult};
use domain::{UserId, API_KEY_PREFIX, BEARER_TOKEN_PREFIX};

use crate::state::AppState;

/// Current authenticated user extracted from the access token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: UserId,
}

/// Authentication middleware that validates access tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_credential(request.headers(), BEARER_TOKEN_PREFIX)?;
    let id = state.auth_service.verify_token(&token)?;

    request.extensions_mut().insert(CurrentUser { id });

    Ok(next.run(request).await)
}

/// Webhook guard: `Authorization: ApiKey <POLKA_KEY>`.
///
/// Every request is rejected while no key is configured.
pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let expected = state
        .config
        .polka_key
        .as_deref()
        .ok_or(AppError::Unauthorized)?;
    let provided = extract_credential(request.headers(), API_KEY_PREFIX)?;

    if !api_key_matches(&provided, expected) {
        tracing::debug!("Rejected webhook with wrong API key");
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// Compare keys without short-circuiting on the first differing byte.
fn api_key_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Value after `prefix` in the Authorization header.
fn extract_credential(headers: &HeaderMap, prefix: &str) -> AppResult<String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let credential = auth_header
        .strip_prefix(prefix)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(AppError::Unauthorized)?;

    Ok(credential.to_string())
}
