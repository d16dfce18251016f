//! Route configuration.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    admin_routes, auth_routes, health_routes, post_handler, user_handler, webhook_handler,
};
use crate::middleware::{api_key_middleware, auth_middleware, count_hits};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let require_user = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let api = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        // Registration is public, credential changes need an access token
        .route(
            "/users",
            post(user_handler::create_user)
                .merge(put(user_handler::update_user).route_layer(require_user.clone())),
        )
        .route(
            "/chirps",
            get(post_handler::list_posts)
                .merge(post(post_handler::create_post).route_layer(require_user.clone())),
        )
        .route(
            "/chirps/:id",
            get(post_handler::get_post)
                .merge(delete(post_handler::delete_post).route_layer(require_user)),
        )
        .route(
            "/polka/webhooks",
            post(webhook_handler::polka_webhook).route_layer(middleware::from_fn_with_state(
                state.clone(),
                api_key_middleware,
            )),
        );

    // Static files; every request counts towards /admin/metrics
    let files = Router::new()
        .nest_service("/app", ServeDir::new(&state.config.fileserver_root))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits));

    Router::new()
        .nest("/api", api)
        .nest("/admin", admin_routes())
        .merge(files)
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}
