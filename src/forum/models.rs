use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ownership::Owned;

/// A community forum post
///
/// Listing is community-wide: any authenticated user sees all posts. Only
/// mutation is owner-gated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ForumPost {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl Owned for ForumPost {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// A comment attached to a forum post
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ForumComment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub comments: String,
    pub created_as: DateTime<Utc>,
}

impl Owned for ForumComment {
    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

/// Create/update request DTO for posts
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForumPostRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    /// Defaults to the server clock when omitted
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// Create request DTO for comments
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForumCommentRequest {
    pub post_id: i64,
    #[validate(length(min = 1))]
    pub comments: String,
    #[serde(default)]
    pub created_as: Option<DateTime<Utc>>,
}
