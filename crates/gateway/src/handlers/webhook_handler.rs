//! Payment provider webhooks.

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{UserId, EVENT_USER_UPGRADED};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Event sent by Polka
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WebhookRequest {
    #[schema(example = "user.upgraded")]
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WebhookData {
    pub user_id: UserId,
}

/// Receive a payment event
#[utoipa::path(
    post,
    path = "/api/polka/webhooks",
    tag = "Webhooks",
    security(("api_key" = [])),
    request_body = WebhookRequest,
    responses(
        (status = 204, description = "Event handled or ignored"),
        (status = 401, description = "Missing or wrong API key"),
        (status = 404, description = "User not found")
    )
)]
pub async fn polka_webhook(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<WebhookRequest>,
) -> AppResult<StatusCode> {
    if payload.event != EVENT_USER_UPGRADED {
        tracing::debug!(event = %payload.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    state
        .user_service
        .mark_subscribed(payload.data.user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
