// HTTP handlers for forum posts and comments

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::auth::gate::AuthenticatedUser;
use crate::error::ApiError;
use crate::forum::models::{ForumComment, ForumCommentRequest, ForumPost, ForumPostRequest};
use crate::ownership::ensure_owner;
use crate::AppState;

/// GET /api/forumposts
/// Community feed: every authenticated user sees all posts.
pub async fn list_posts(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<ForumPost>>, ApiError> {
    let posts = state.forum.find_all_posts().await?;
    Ok(Json(posts))
}

/// POST /api/forumposts
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ForumPostRequest>,
) -> Result<(StatusCode, Json<ForumPost>), ApiError> {
    request.validate()?;

    let created = request.created.unwrap_or_else(Utc::now);
    let post = state
        .forum
        .create_post(user.principal_id, &request.title, &request.content, created)
        .await?;

    tracing::info!("User {} created forum post {}", user.principal_id, post.id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/forumposts/:id
pub async fn update_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<ForumPostRequest>,
) -> Result<Json<ForumPost>, ApiError> {
    request.validate()?;

    let existing = state
        .forum
        .find_post_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Forum post", id })?;
    ensure_owner(&user, &existing)?;

    let updated = state
        .forum
        .update_post(id, &request.title, &request.content)
        .await?
        .ok_or(ApiError::NotFound { resource: "Forum post", id })?;

    Ok(Json(updated))
}

/// DELETE /api/forumposts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing = state
        .forum
        .find_post_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Forum post", id })?;
    ensure_owner(&user, &existing)?;

    if state.forum.delete_post(id).await? == 0 {
        return Err(ApiError::NotFound { resource: "Forum post", id });
    }

    tracing::info!("User {} deleted forum post {}", user.principal_id, id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/comments/:post_id
pub async fn list_comments(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<ForumComment>>, ApiError> {
    state
        .forum
        .find_post_by_id(post_id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Forum post", id: post_id })?;

    let comments = state.forum.find_comments_by_post(post_id).await?;
    Ok(Json(comments))
}

/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ForumCommentRequest>,
) -> Result<(StatusCode, Json<ForumComment>), ApiError> {
    request.validate()?;

    // The target post must exist before a comment can attach to it
    state
        .forum
        .find_post_by_id(request.post_id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Forum post", id: request.post_id })?;

    let created_as = request.created_as.unwrap_or_else(Utc::now);
    let comment = state
        .forum
        .create_comment(request.post_id, user.principal_id, &request.comments, created_as)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing = state
        .forum
        .find_comment_by_id(comment_id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Comment", id: comment_id })?;
    ensure_owner(&user, &existing)?;

    if state.forum.delete_comment(comment_id).await? == 0 {
        return Err(ApiError::NotFound { resource: "Comment", id: comment_id });
    }

    Ok(StatusCode::NO_CONTENT)
}
