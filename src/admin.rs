// Admin surface: user management and unscoped views over resource data
//
// Every route here sits behind the ADMIN rules of the route policy, so the
// handlers do not re-check roles.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::models::{Role, UserResponse};
use crate::auth::password::PasswordService;
use crate::error::ApiError;
use crate::transactions::models::Transaction;
use crate::AppState;

/// Admin-created user; unlike signup, the role is settable here
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminUpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// GET /api/admin/users and GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "User", id })?;

    Ok(Json(user.into()))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    let password_hash = PasswordService::hash_password(&request.password)?;
    let user = state
        .users
        .create_user(&request.name, &request.email, &password_hash, request.role)
        .await?;

    tracing::info!("Admin created user {} with role {}", user.id, user.role);
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AdminUpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "User", id })?;

    let user = state
        .users
        .update_profile(id, request.name.as_deref(), request.email.as_deref())
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.users.delete_user(id).await? == 0 {
        return Err(ApiError::NotFound { resource: "User", id });
    }

    tracing::info!("Admin deleted user {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/transactions
pub async fn list_all_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let rows = state.transactions.find_all().await?;
    Ok(Json(rows))
}

/// DELETE /api/admin/transactions/:id
pub async fn admin_delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.transactions.delete(id).await? == 0 {
        return Err(ApiError::NotFound { resource: "Transaction", id });
    }

    Ok(StatusCode::NO_CONTENT)
}
