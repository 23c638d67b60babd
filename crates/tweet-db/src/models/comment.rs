//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub body: String,
    pub tweet_id: i64,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comment row left-joined with its author; author columns are NULL for
/// comments whose author was deleted
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorModel {
    pub id: i64,
    pub body: String,
    pub tweet_id: i64,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_username: Option<String>,
    pub author_email: Option<String>,
    pub author_first_name: Option<String>,
    pub author_last_name: Option<String>,
    pub author_created_at: Option<DateTime<Utc>>,
}

impl CommentWithAuthorModel {
    /// Check if the author row is missing
    #[inline]
    pub fn is_orphaned(&self) -> bool {
        self.user_id.is_none()
    }
}
