//! Refresh session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for refresh_sessions table
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSessionModel {
    pub id: Uuid,
    pub user_id: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}
