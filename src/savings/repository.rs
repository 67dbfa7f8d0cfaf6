use sqlx::PgPool;

use crate::error::ApiError;
use crate::savings::models::{SavingsGoal, SavingsRequest};

const COLUMNS: &str = "id, user_id, goal_name, target_amt, curr_amt, deadline";

/// Repository for savings goal records
#[derive(Clone)]
pub struct SavingsRepository {
    pool: PgPool,
}

impl SavingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<SavingsGoal>, ApiError> {
        let rows = sqlx::query_as::<_, SavingsGoal>(&format!(
            "SELECT {COLUMNS} FROM savings WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_all(&self) -> Result<Vec<SavingsGoal>, ApiError> {
        let rows =
            sqlx::query_as::<_, SavingsGoal>(&format!("SELECT {COLUMNS} FROM savings ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<SavingsGoal>, ApiError> {
        let row = sqlx::query_as::<_, SavingsGoal>(&format!(
            "SELECT {COLUMNS} FROM savings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create(
        &self,
        owner_id: i64,
        request: &SavingsRequest,
    ) -> Result<SavingsGoal, ApiError> {
        let row = sqlx::query_as::<_, SavingsGoal>(&format!(
            "INSERT INTO savings (user_id, goal_name, target_amt, curr_amt, deadline) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&request.goal_name)
        .bind(request.target_amt)
        .bind(request.curr_amt)
        .bind(request.deadline)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        request: &SavingsRequest,
    ) -> Result<Option<SavingsGoal>, ApiError> {
        let row = sqlx::query_as::<_, SavingsGoal>(&format!(
            "UPDATE savings SET goal_name = $1, target_amt = $2, curr_amt = $3, deadline = $4 \
             WHERE id = $5 RETURNING {COLUMNS}"
        ))
        .bind(&request.goal_name)
        .bind(request.target_amt)
        .bind(request.curr_amt)
        .bind(request.deadline)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM savings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
