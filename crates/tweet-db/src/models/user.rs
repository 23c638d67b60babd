//! User database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for user_roles table
#[derive(Debug, Clone, FromRow)]
pub struct UserRoleModel {
    pub user_id: String,
    pub role: String,
}
