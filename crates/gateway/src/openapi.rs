//! OpenAPI documentation.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{LoginRequest, LoginResponse, TokenResponse};
use crate::handlers::post_handler::CreatePostRequest;
use crate::handlers::user_handler::CredentialsRequest;
use crate::handlers::webhook_handler::{WebhookData, WebhookRequest};
use domain::{Post, SortOrder, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::admin_handler::metrics,
        crate::handlers::admin_handler::reset,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::refresh,
        crate::handlers::auth_handler::revoke,
        crate::handlers::post_handler::create_post,
        crate::handlers::post_handler::list_posts,
        crate::handlers::post_handler::get_post,
        crate::handlers::post_handler::delete_post,
        crate::handlers::webhook_handler::polka_webhook,
    ),
    components(
        schemas(
            CredentialsRequest,
            LoginRequest,
            LoginResponse,
            TokenResponse,
            UserResponse,
            CreatePostRequest,
            Post,
            SortOrder,
            WebhookRequest,
            WebhookData,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Admin", description = "Metrics and development reset"),
        (name = "Authentication", description = "Login and token lifecycle"),
        (name = "Users", description = "Account management"),
        (name = "Chirps", description = "Posts"),
        (name = "Webhooks", description = "Payment provider callbacks"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            // Value must be sent as "ApiKey <key>"
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}
