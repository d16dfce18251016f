//! Post ("chirp") handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::AppResult;
use domain::{Post, PostId, SortOrder, UserId};

use crate::extractors::ValidatedJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// New post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    /// Post text; at most 140 characters after filtering
    #[schema(example = "I had something interesting for breakfast")]
    pub body: String,
}

/// Listing filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    /// Only posts by this author
    pub author_id: Option<UserId>,
    /// `asc` (default) or `desc`, by ID
    pub sort: Option<SortOrder>,
}

/// Publish a post as the authenticated user
#[utoipa::path(
    post,
    path = "/api/chirps",
    tag = "Chirps",
    security(("bearer_auth" = [])),
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 400, description = "Post too long"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_post(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<Post>)> {
    let post = state
        .post_service
        .create_post(current_user.id, &payload.body)
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// List posts
#[utoipa::path(
    get,
    path = "/api/chirps",
    tag = "Chirps",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Posts ordered by ID", body = Vec<Post>)
    )
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = state
        .post_service
        .list_posts(query.author_id, query.sort.unwrap_or_default())
        .await?;

    Ok(Json(posts))
}

/// Get a single post
#[utoipa::path(
    get,
    path = "/api/chirps/{id}",
    tag = "Chirps",
    params(
        ("id" = i64, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 404, description = "Post not found")
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> AppResult<Json<Post>> {
    Ok(Json(state.post_service.get_post(id).await?))
}

/// Delete one of your own posts
#[utoipa::path(
    delete,
    path = "/api/chirps/{id}",
    tag = "Chirps",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Post ID")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn delete_post(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<PostId>,
) -> AppResult<StatusCode> {
    state.post_service.delete_post(id, current_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
