//! Refresh session entity <-> model mapper

use tweet_core::entities::RefreshSession;
use tweet_core::value_objects::UserId;

use crate::models::RefreshSessionModel;

impl From<RefreshSessionModel> for RefreshSession {
    fn from(model: RefreshSessionModel) -> Self {
        RefreshSession {
            id: model.id,
            user_id: UserId::new(model.user_id),
            expires_at: model.expires_at,
            created_at: model.created_at,
            revoked_at: model.revoked_at,
        }
    }
}
