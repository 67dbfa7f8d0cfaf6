use sqlx::PgPool;

use crate::budgets::models::{Budget, BudgetRequest};
use crate::error::ApiError;

const COLUMNS: &str = "id, user_id, category, amount, start_date, end_date";

/// Repository for budget records
#[derive(Clone)]
pub struct BudgetRepository {
    pool: PgPool,
}

impl BudgetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<Budget>, ApiError> {
        let rows = sqlx::query_as::<_, Budget>(&format!(
            "SELECT {COLUMNS} FROM budget WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_all(&self) -> Result<Vec<Budget>, ApiError> {
        let rows =
            sqlx::query_as::<_, Budget>(&format!("SELECT {COLUMNS} FROM budget ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Budget>, ApiError> {
        let row = sqlx::query_as::<_, Budget>(&format!(
            "SELECT {COLUMNS} FROM budget WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create(&self, owner_id: i64, request: &BudgetRequest) -> Result<Budget, ApiError> {
        let row = sqlx::query_as::<_, Budget>(&format!(
            "INSERT INTO budget (user_id, category, amount, start_date, end_date) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&request.category)
        .bind(request.amount)
        .bind(&request.start_date)
        .bind(&request.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        request: &BudgetRequest,
    ) -> Result<Option<Budget>, ApiError> {
        let row = sqlx::query_as::<_, Budget>(&format!(
            "UPDATE budget SET category = $1, amount = $2, start_date = $3, end_date = $4 \
             WHERE id = $5 RETURNING {COLUMNS}"
        ))
        .bind(&request.category)
        .bind(request.amount)
        .bind(&request.start_date)
        .bind(&request.end_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM budget WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
