//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{CommentId, TweetId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Tweet not found: {0}")]
    TweetNotFound(TweetId),

    #[error("Comment not found: {0}")]
    CommentNotFound(CommentId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Body must not be empty")]
    EmptyBody,

    #[error("Body too long: max {max} characters")]
    BodyTooLong { max: usize },

    #[error("Tweet {tweet_id} does not belong to user {user_id}")]
    TweetOwnerMismatch { tweet_id: TweetId, user_id: UserId },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not tweet owner")]
    NotTweetOwner,

    #[error("Not comment owner")]
    NotCommentOwner,

    #[error("Missing role: {0}")]
    MissingRole(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::TweetNotFound(_) => "UNKNOWN_TWEET",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyBody => "EMPTY_BODY",
            Self::BodyTooLong { .. } => "BODY_TOO_LONG",
            Self::TweetOwnerMismatch { .. } => "TWEET_OWNER_MISMATCH",

            // Authorization
            Self::NotTweetOwner => "NOT_TWEET_OWNER",
            Self::NotCommentOwner => "NOT_COMMENT_OWNER",
            Self::MissingRole(_) => "MISSING_ROLE",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::TweetNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyBody
                | Self::BodyTooLong { .. }
                | Self::TweetOwnerMismatch { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotTweetOwner | Self::NotCommentOwner | Self::MissingRole(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::UsernameAlreadyExists)
    }
}
