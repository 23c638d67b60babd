//! Tweet entity - a short text post owned by exactly one user

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{TweetId, UserId};

/// Maximum body length for tweets and comments, in characters
pub const MAX_BODY_CHARS: usize = 280;

/// Tweet entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub id: TweetId,
    pub user_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Tweet {
    /// Check if the tweet belongs to the given user
    #[inline]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// A tweet that has not been persisted yet (the datastore assigns the id)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTweet {
    pub user_id: UserId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl NewTweet {
    /// Validate the body and stamp the creation time
    pub fn new(user_id: UserId, body: Option<String>) -> Result<Self, DomainError> {
        Ok(Self {
            user_id,
            body: validate_body(body)?,
            created_at: Utc::now(),
        })
    }
}

/// Validate a tweet/comment body: present, not blank, at most `MAX_BODY_CHARS`
pub fn validate_body(body: Option<String>) -> Result<String, DomainError> {
    let body = body.ok_or(DomainError::EmptyBody)?;
    if body.trim().is_empty() {
        return Err(DomainError::EmptyBody);
    }
    if body.chars().count() > MAX_BODY_CHARS {
        return Err(DomainError::BodyTooLong {
            max: MAX_BODY_CHARS,
        });
    }
    Ok(body)
}
