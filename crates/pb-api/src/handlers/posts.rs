//! Posts API handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pb_core::traits::Id;
use pb_models::Post;
use pb_services::posts::{
    CreatePostService, DeletePostService, FindPostService, ListPostsService, UpdatePostService,
};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, PostForm, PostId};

#[derive(Debug, Serialize)]
pub struct PostCollection {
    pub posts: Vec<Post>,
}

/// Acknowledgment of a create or update
#[derive(Debug, Serialize)]
pub struct PostAck {
    pub message: String,
    pub post: Post,
}

/// Acknowledgment of a delete
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub message: String,
    pub id: Id,
}

/// List all posts
///
/// GET /posts
pub async fn list_posts(State(state): State<AppState>) -> ApiResult<Json<PostCollection>> {
    let posts = ListPostsService::new(&state.services).call().await.into_result()?;
    Ok(Json(PostCollection { posts }))
}

/// Get a single post
///
/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> ApiResult<Json<Post>> {
    let post = FindPostService::new(&state.services).call(id).await.into_result()?;
    Ok(Json(post))
}

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    form: PostForm,
) -> ApiResult<impl IntoResponse> {
    let (post, message) = CreatePostService::new(&state.services)
        .call(form.into_params())
        .await
        .into_parts()?;

    Ok((
        StatusCode::CREATED,
        Json(PostAck {
            message: message.unwrap_or_default(),
            post,
        }),
    ))
}

/// Update a post
///
/// PUT /posts/:id, PATCH /posts/:id
pub async fn update_post(
    State(state): State<AppState>,
    PostId(id): PostId,
    form: PostForm,
) -> ApiResult<Json<PostAck>> {
    let (post, message) = UpdatePostService::new(&state.services)
        .call(id, form.into_params())
        .await
        .into_parts()?;

    Ok(Json(PostAck {
        message: message.unwrap_or_default(),
        post,
    }))
}

/// Update a post through a form that can only POST
///
/// POST /posts/:id with `_method=PUT` or `_method=PATCH`
pub async fn update_post_via_override(
    state: State<AppState>,
    id: PostId,
    form: PostForm,
) -> ApiResult<Json<PostAck>> {
    if !form.overrides_to_update() {
        return Err(ApiError::method_not_allowed(
            "POST /posts/:id requires _method=PUT or _method=PATCH",
        ));
    }
    update_post(state, id, form).await
}

/// Delete a post
///
/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    PostId(id): PostId,
) -> ApiResult<Json<DeleteAck>> {
    let (post, message) = DeletePostService::new(&state.services)
        .call(id)
        .await
        .into_parts()?;

    Ok(Json(DeleteAck {
        message: message.unwrap_or_default(),
        id: post.id,
    }))
}
