use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::ApiError;
use crate::forum::models::{ForumComment, ForumPost};

const POST_COLUMNS: &str = "id, user_id, title, content, created";
const COMMENT_COLUMNS: &str = "id, post_id, user_id, comments, created_as";

/// Repository for forum posts and comments
#[derive(Clone)]
pub struct ForumRepository {
    pool: PgPool,
}

impl ForumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All community posts, newest first
    pub async fn find_all_posts(&self) -> Result<Vec<ForumPost>, ApiError> {
        let rows = sqlx::query_as::<_, ForumPost>(&format!(
            "SELECT {POST_COLUMNS} FROM forumposts ORDER BY created DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_post_by_id(&self, id: i64) -> Result<Option<ForumPost>, ApiError> {
        let row = sqlx::query_as::<_, ForumPost>(&format!(
            "SELECT {POST_COLUMNS} FROM forumposts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create_post(
        &self,
        owner_id: i64,
        title: &str,
        content: &str,
        created: DateTime<Utc>,
    ) -> Result<ForumPost, ApiError> {
        let row = sqlx::query_as::<_, ForumPost>(&format!(
            "INSERT INTO forumposts (user_id, title, content, created) \
             VALUES ($1, $2, $3, $4) RETURNING {POST_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(title)
        .bind(content)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update_post(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Option<ForumPost>, ApiError> {
        let row = sqlx::query_as::<_, ForumPost>(&format!(
            "UPDATE forumposts SET title = $1, content = $2 WHERE id = $3 \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_post(&self, id: i64) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM forumposts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Comments for one post, oldest first
    pub async fn find_comments_by_post(&self, post_id: i64) -> Result<Vec<ForumComment>, ApiError> {
        let rows = sqlx::query_as::<_, ForumComment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM forumcomments WHERE post_id = $1 ORDER BY created_as"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_comment_by_id(&self, id: i64) -> Result<Option<ForumComment>, ApiError> {
        let row = sqlx::query_as::<_, ForumComment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM forumcomments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create_comment(
        &self,
        post_id: i64,
        owner_id: i64,
        comments: &str,
        created_as: DateTime<Utc>,
    ) -> Result<ForumComment, ApiError> {
        let row = sqlx::query_as::<_, ForumComment>(&format!(
            "INSERT INTO forumcomments (post_id, user_id, comments, created_as) \
             VALUES ($1, $2, $3, $4) RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(post_id)
        .bind(owner_id)
        .bind(comments)
        .bind(created_as)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_comment(&self, id: i64) -> Result<u64, ApiError> {
        let result = sqlx::query("DELETE FROM forumcomments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
