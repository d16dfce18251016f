//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::UserId;

use crate::extractors::{trimmed, BearerToken, ValidatedJson};
use crate::state::AppState;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
    /// Shorter access token lifetime, in seconds
    #[schema(example = 600)]
    pub expires_in_seconds: Option<i64>,
}

/// Successful login: the user plus both tokens
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub id: UserId,
    pub email: String,
    pub is_chirpy_red: bool,
    /// Access token (JWT)
    pub token: String,
    /// Opaque refresh token
    pub refresh_token: String,
}

/// New access token
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/revoke", post(revoke))
}

/// Login and get an access token plus a refresh token
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let session = state
        .auth_service
        .login(&payload.email, &payload.password, payload.expires_in_seconds)
        .await?;

    Ok(Json(LoginResponse {
        id: session.user.id,
        email: session.user.email,
        is_chirpy_red: session.user.is_chirpy_red,
        token: session.access_token,
        refresh_token: session.refresh_token,
    }))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/refresh",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New access token", body = TokenResponse),
        (status = 401, description = "Missing, expired or revoked refresh token")
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> AppResult<Json<TokenResponse>> {
    let token = state.auth_service.refresh(&refresh_token).await?;
    Ok(Json(TokenResponse { token }))
}

/// Revoke a refresh token
#[utoipa::path(
    post,
    path = "/api/revoke",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Token revoked"),
        (status = 401, description = "Missing bearer token"),
        (status = 404, description = "Unknown refresh token")
    )
)]
pub async fn revoke(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> AppResult<StatusCode> {
    state.auth_service.revoke(&refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
