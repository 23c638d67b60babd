//! Comment entity - a reply attached to exactly one tweet

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{CommentId, TweetId, UserId};

use super::tweet::validate_body;

/// Comment entity
///
/// `user_id` is `None` once the author's account has been deleted; the
/// comment itself survives on other users' tweets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub tweet_id: TweetId,
    pub user_id: Option<UserId>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Check if the comment was written by the given user
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        self.user_id.as_ref() == Some(user_id)
    }

    /// Check if the author account no longer exists
    #[inline]
    pub fn is_orphaned(&self) -> bool {
        self.user_id.is_none()
    }
}

/// A comment that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub tweet_id: TweetId,
    pub user_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    /// Validate the body and stamp the creation time
    pub fn new(tweet_id: TweetId, user_id: UserId, body: Option<String>) -> Result<Self, DomainError> {
        Ok(Self {
            tweet_id,
            user_id,
            body: validate_body(body)?,
            created_at: Utc::now(),
        })
    }
}
