// HTTP handlers for savings goal endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::gate::AuthenticatedUser;
use crate::error::ApiError;
use crate::ownership::ensure_owner;
use crate::savings::models::{SavingsGoal, SavingsRequest};
use crate::AppState;

/// GET /api/savings
pub async fn list_savings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<SavingsGoal>>, ApiError> {
    let rows = if user.is_admin() {
        state.savings.find_all().await?
    } else {
        state.savings.find_by_owner(user.principal_id).await?
    };

    Ok(Json(rows))
}

/// GET /api/savings/:id
pub async fn get_savings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<SavingsGoal>, ApiError> {
    let goal = state
        .savings
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Savings goal", id })?;

    ensure_owner(&user, &goal)?;
    Ok(Json(goal))
}

/// POST /api/savings
pub async fn create_savings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<SavingsRequest>,
) -> Result<(StatusCode, Json<SavingsGoal>), ApiError> {
    request.validate()?;

    let goal = state.savings.create(user.principal_id, &request).await?;

    tracing::info!("User {} created savings goal {}", user.principal_id, goal.id);
    Ok((StatusCode::CREATED, Json(goal)))
}

/// PUT /api/savings/:id
pub async fn update_savings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<SavingsRequest>,
) -> Result<Json<SavingsGoal>, ApiError> {
    request.validate()?;

    let existing = state
        .savings
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Savings goal", id })?;
    ensure_owner(&user, &existing)?;

    let updated = state
        .savings
        .update(id, &request)
        .await?
        .ok_or(ApiError::NotFound { resource: "Savings goal", id })?;

    Ok(Json(updated))
}

/// DELETE /api/savings/:id
pub async fn delete_savings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing = state
        .savings
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Savings goal", id })?;
    ensure_owner(&user, &existing)?;

    if state.savings.delete(id).await? == 0 {
        return Err(ApiError::NotFound { resource: "Savings goal", id });
    }

    tracing::info!("User {} deleted savings goal {}", user.principal_id, id);
    Ok(StatusCode::NO_CONTENT)
}
