//! Tweet database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for tweets table
#[derive(Debug, Clone, FromRow)]
pub struct TweetModel {
    pub id: i64,
    pub body: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Tweet row joined with its author (`tweets JOIN users`)
#[derive(Debug, Clone, FromRow)]
pub struct TweetWithAuthorModel {
    pub id: i64,
    pub body: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub author_username: String,
    pub author_email: String,
    pub author_first_name: String,
    pub author_last_name: String,
    pub author_created_at: DateTime<Utc>,
}
