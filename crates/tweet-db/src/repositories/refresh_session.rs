//! PostgreSQL implementation of RefreshSessionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tweet_core::entities::RefreshSession;
use tweet_core::traits::{RefreshSessionRepository, RepoResult};
use tweet_core::value_objects::UserId;

use crate::models::RefreshSessionModel;

use super::error::{map_db_error, map_foreign_key_violation, user_not_found};

/// PostgreSQL implementation of RefreshSessionRepository
#[derive(Clone)]
pub struct PgRefreshSessionRepository {
    pool: PgPool,
}

impl PgRefreshSessionRepository {
    /// Create a new PgRefreshSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshSessionRepository for PgRefreshSessionRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id))]
    async fn create(&self, session: &RefreshSession) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO refresh_sessions (id, user_id, expires_at, created_at, revoked_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(session.id)
        .bind(session.user_id.as_str())
        .bind(session.expires_at)
        .bind(session.created_at)
        .bind(session.revoked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, |_| user_not_found(&session.user_id)))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_active(&self, id: Uuid) -> RepoResult<Option<RefreshSession>> {
        let result = sqlx::query_as::<_, RefreshSessionModel>(
            r"
            SELECT id, user_id, expires_at, created_at, revoked_at
            FROM refresh_sessions
            WHERE id = $1 AND revoked_at IS NULL AND expires_at > NOW()
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshSession::from))
    }

    #[instrument(skip(self))]
    async fn revoke(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE refresh_sessions
            SET revoked_at = NOW()
            WHERE id = $1 AND revoked_at IS NULL
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn revoke_all_for_user(&self, user_id: &UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE refresh_sessions
            SET revoked_at = NOW()
            WHERE user_id = $1 AND revoked_at IS NULL
            ",
        )
        .bind(user_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
