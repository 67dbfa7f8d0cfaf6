// Export requests: a record of a user asking for their data in some format

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use utoipa::ToSchema;

use crate::auth::gate::AuthenticatedUser;
use crate::error::ApiError;
use crate::ownership::Owned;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Export {
    pub id: i64,
    pub user_id: i64,
    pub format: String,
    pub exported: DateTime<Utc>,
}

impl Owned for Export {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Create request DTO; any owner field in the body is ignored
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportRequest {
    pub format: String,
    #[serde(default)]
    pub exported: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Repository for export records
#[derive(Clone)]
pub struct ExportsRepository {
    pool: PgPool,
}

impl ExportsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<Export>, ApiError> {
        let rows = sqlx::query_as::<_, Export>(
            "SELECT id, user_id, format, exported FROM exports WHERE user_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn create(
        &self,
        owner_id: i64,
        format: &str,
        exported: DateTime<Utc>,
    ) -> Result<Export, ApiError> {
        let row = sqlx::query_as::<_, Export>(
            "INSERT INTO exports (user_id, format, exported) VALUES ($1, $2, $3) \
             RETURNING id, user_id, format, exported",
        )
        .bind(owner_id)
        .bind(format)
        .bind(exported)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

/// POST /api/exports
/// Records an export request for the authenticated principal.
pub async fn create_export(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<ExportRequest>,
) -> Result<(StatusCode, Json<Export>), ApiError> {
    if request.format.trim().is_empty() {
        return Err(ApiError::BadRequest("Format is required".to_string()));
    }

    let exported = request.exported.unwrap_or_else(Utc::now);
    let export = state
        .exports
        .create(user.principal_id, &request.format, exported)
        .await?;

    Ok((StatusCode::CREATED, Json(export)))
}

/// GET /api/exports
pub async fn list_exports(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Export>>, ApiError> {
    let rows = state.exports.find_by_owner(user.principal_id).await?;
    Ok(Json(rows))
}
