//! Refresh session - server-side record backing a refresh token

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::value_objects::UserId;

/// A refresh token session; the token carries `id` as its session claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSession {
    pub id: Uuid,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshSession {
    /// Open a new session that lives for `ttl_seconds`
    pub fn open(user_id: UserId, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            expires_at: now + Duration::seconds(ttl_seconds),
            created_at: now,
            revoked_at: None,
        }
    }

    #[inline]
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Not revoked and not expired
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }
}
