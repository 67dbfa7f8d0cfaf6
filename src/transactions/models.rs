use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ownership::Owned;

/// A single income or expense entry belonging to one user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    /// "income" or "expense"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// ISO date string (YYYY-MM-DD)
    pub date: String,
}

impl Owned for Transaction {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Create/update request DTO
///
/// `user_id` is accepted for wire compatibility with older clients but is
/// untrusted input: the owner of a created transaction is always the
/// authenticated principal.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    #[validate(custom = "crate::validation::validate_transaction_type")]
    pub kind: String,
    #[validate(custom = "crate::validation::validate_positive_amount")]
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom = "crate::validation::validate_iso_date")]
    pub date: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}
