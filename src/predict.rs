// Naive expense predictor: a moving average over recent monthly totals

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::auth::gate::AuthenticatedUser;
use crate::error::ApiError;
use crate::transactions::models::Transaction;
use crate::AppState;

/// How many trailing months feed the moving average
const WINDOW: usize = 3;

#[derive(Debug, Serialize, ToSchema)]
pub struct PredictionResponse {
    pub user_id: i64,
    pub predicted_expense: f64,
}

/// Total expenses per calendar month, in chronological order
///
/// Transactions with an unparseable date or a non-expense type are skipped.
pub fn monthly_expense_totals(transactions: &[Transaction]) -> Vec<f64> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for txn in transactions {
        if !txn.kind.eq_ignore_ascii_case("expense") {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(&txn.date, "%Y-%m-%d") else {
            continue;
        };
        *by_month.entry((date.year(), date.month())).or_insert(0.0) += txn.amount;
    }

    by_month.into_values().collect()
}

/// Average of the last `WINDOW` monthly totals; 0.0 with no history
pub fn moving_average_prediction(monthly_totals: &[f64]) -> f64 {
    if monthly_totals.is_empty() {
        return 0.0;
    }

    let window = WINDOW.min(monthly_totals.len());
    let tail = &monthly_totals[monthly_totals.len() - window..];
    tail.iter().sum::<f64>() / window as f64
}

async fn predict_for(state: &AppState, user_id: i64) -> Result<PredictionResponse, ApiError> {
    let transactions = state.transactions.find_by_owner(user_id).await?;
    let totals = monthly_expense_totals(&transactions);

    Ok(PredictionResponse {
        user_id,
        predicted_expense: moving_average_prediction(&totals),
    })
}

/// GET /api/predict
/// Predicts next month's expenses for the authenticated principal.
pub async fn get_own_prediction(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<PredictionResponse>, ApiError> {
    Ok(Json(predict_for(&state, user.principal_id).await?))
}

/// GET /api/predict/:user_id
/// Admins may query any principal; everyone else only themselves.
pub async fn get_prediction_for(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<i64>,
) -> Result<Json<PredictionResponse>, ApiError> {
    if !user.is_admin() && user_id != user.principal_id {
        return Err(ApiError::OwnershipForbidden);
    }

    Ok(Json(predict_for(&state, user_id).await?))
}
