use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ownership::Owned;

/// A spending limit for one category over a date range
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub amount: f64,
    pub start_date: String,
    pub end_date: String,
}

impl Owned for Budget {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Create/update request DTO; any owner field in the body is ignored
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BudgetRequest {
    pub category: String,
    #[validate(custom = "crate::validation::validate_positive_amount")]
    pub amount: f64,
    #[validate(custom = "crate::validation::validate_iso_date")]
    pub start_date: String,
    #[validate(custom = "crate::validation::validate_iso_date")]
    pub end_date: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}
