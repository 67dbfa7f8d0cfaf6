// HTTP handlers for budget endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::gate::AuthenticatedUser;
use crate::budgets::models::{Budget, BudgetRequest};
use crate::error::ApiError;
use crate::ownership::ensure_owner;
use crate::AppState;

/// GET /api/budget
pub async fn list_budgets(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Budget>>, ApiError> {
    let rows = if user.is_admin() {
        state.budgets.find_all().await?
    } else {
        state.budgets.find_by_owner(user.principal_id).await?
    };

    Ok(Json(rows))
}

/// GET /api/budget/:id
pub async fn get_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Budget>, ApiError> {
    let budget = state
        .budgets
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Budget", id })?;

    ensure_owner(&user, &budget)?;
    Ok(Json(budget))
}

/// POST /api/budget
pub async fn create_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<BudgetRequest>,
) -> Result<(StatusCode, Json<Budget>), ApiError> {
    request.validate()?;

    let budget = state.budgets.create(user.principal_id, &request).await?;

    tracing::info!("User {} created budget {}", user.principal_id, budget.id);
    Ok((StatusCode::CREATED, Json(budget)))
}

/// PUT /api/budget/:id
pub async fn update_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<BudgetRequest>,
) -> Result<Json<Budget>, ApiError> {
    request.validate()?;

    let existing = state
        .budgets
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Budget", id })?;
    ensure_owner(&user, &existing)?;

    let updated = state
        .budgets
        .update(id, &request)
        .await?
        .ok_or(ApiError::NotFound { resource: "Budget", id })?;

    Ok(Json(updated))
}

/// DELETE /api/budget/:id
pub async fn delete_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing = state
        .budgets
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Budget", id })?;
    ensure_owner(&user, &existing)?;

    if state.budgets.delete(id).await? == 0 {
        return Err(ApiError::NotFound { resource: "Budget", id });
    }

    tracing::info!("User {} deleted budget {}", user.principal_id, id);
    Ok(StatusCode::NO_CONTENT)
}
