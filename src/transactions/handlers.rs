// HTTP handlers for transaction endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::gate::AuthenticatedUser;
use crate::error::ApiError;
use crate::ownership::ensure_owner;
use crate::transactions::models::{Transaction, TransactionRequest};
use crate::AppState;

/// GET /api/transaction
/// Lists the caller's transactions; admins see all transactions.
pub async fn list_transactions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let rows = if user.is_admin() {
        state.transactions.find_all().await?
    } else {
        state.transactions.find_by_owner(user.principal_id).await?
    };

    Ok(Json(rows))
}

/// GET /api/transaction/:id
pub async fn get_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    let transaction = state
        .transactions
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Transaction", id })?;

    ensure_owner(&user, &transaction)?;
    Ok(Json(transaction))
}

/// POST /api/transaction
/// The owner is always the authenticated principal; a `user_id` in the body
/// is discarded.
pub async fn create_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<TransactionRequest>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    request.validate()?;

    if let Some(claimed) = request.user_id {
        if claimed != user.principal_id {
            tracing::debug!(
                "Discarding client-supplied owner {} on transaction create by {}",
                claimed,
                user.principal_id
            );
        }
    }

    let transaction = state
        .transactions
        .create(user.principal_id, &request)
        .await?;

    tracing::info!(
        "User {} created transaction {}",
        user.principal_id,
        transaction.id
    );
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// PUT /api/transaction/:id
pub async fn update_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    request.validate()?;

    let existing = state
        .transactions
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Transaction", id })?;
    ensure_owner(&user, &existing)?;

    // The row can disappear between the ownership check and the write; that
    // races with the owner deleting it elsewhere and surfaces as 404.
    let updated = state
        .transactions
        .update(id, &request)
        .await?
        .ok_or(ApiError::NotFound { resource: "Transaction", id })?;

    Ok(Json(updated))
}

/// DELETE /api/transaction/:id
pub async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let existing = state
        .transactions
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { resource: "Transaction", id })?;
    ensure_owner(&user, &existing)?;

    if state.transactions.delete(id).await? == 0 {
        return Err(ApiError::NotFound { resource: "Transaction", id });
    }

    tracing::info!("User {} deleted transaction {}", user.principal_id, id);
    Ok(StatusCode::NO_CONTENT)
}
