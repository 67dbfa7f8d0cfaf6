use sqlx::PgPool;

use crate::error::ApiError;
use crate::transactions::models::{Transaction, TransactionRequest};

const COLUMNS: &str = r#"id, user_id, "type", amount, category, description, date"#;

/// Repository for transaction records
#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Transactions owned by one principal
    pub async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<Transaction>, ApiError> {
        let rows = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE user_id = $1 ORDER BY id"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All transactions, unscoped (admin surface)
    pub async fn find_all(&self) -> Result<Vec<Transaction>, ApiError> {
        let rows = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {COLUMNS} FROM transactions ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Transaction>, ApiError> {
        let row = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {COLUMNS} FROM transactions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Insert a transaction owned by `owner_id`
    pub async fn create(
        &self,
        owner_id: i64,
        request: &TransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let row = sqlx::query_as::<_, Transaction>(&format!(
            r#"INSERT INTO transactions (user_id, "type", amount, category, description, date)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {COLUMNS}"#
        ))
        .bind(owner_id)
        .bind(&request.kind)
        .bind(request.amount)
        .bind(&request.category)
        .bind(&request.description)
        .bind(&request.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Replace the mutable fields of a transaction
    ///
    /// Returns None when the row no longer exists, which callers surface as
    /// 404 rather than a crash.
    pub async fn update(
        &self,
        id: i64,
        request: &TransactionRequest,
    ) -> Result<Option<Transaction>, ApiError> {
        let row = sqlx::query_as::<_, Transaction>(&format!(
            r#"UPDATE transactions
               SET "type" = $1, amount = $2, category = $3, description = $4, date = $5
               WHERE id = $6
               RETURNING {COLUMNS}"#
        ))
        .bind(&request.kind)
        .bind(request.amount)
        .bind(&request.category)
        .bind(&request.description)
        .bind(&request.date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete(&self, id: i64) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
