use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ownership::Owned;

/// A savings goal with a target amount and deadline
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: i64,
    pub goal_name: String,
    pub target_amt: f64,
    pub curr_amt: f64,
    pub deadline: NaiveDate,
}

impl Owned for SavingsGoal {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Create/update request DTO; any owner field in the body is ignored
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SavingsRequest {
    pub goal_name: String,
    #[validate(custom = "crate::validation::validate_positive_amount")]
    pub target_amt: f64,
    pub curr_amt: f64,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub user_id: Option<i64>,
}
