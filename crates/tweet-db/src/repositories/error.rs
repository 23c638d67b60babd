//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use tweet_core::error::DomainError;
use tweet_core::value_objects::{CommentId, TweetId, UserId};

/// Unique index on `LOWER(username)`
const USERNAME_UNIQUE: &str = "users_username_key";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map unique violations on the users table to the matching conflict error
pub fn map_user_conflict(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return if db_err.constraint() == Some(USERNAME_UNIQUE) {
                DomainError::UsernameAlreadyExists
            } else {
                DomainError::EmailAlreadyExists
            };
        }
    }
    map_db_error(e)
}

/// Foreign key from `comments.user_id` to `users`
pub const COMMENT_AUTHOR_FK: &str = "comments_user_id_fkey";

/// Map a foreign key violation (referenced row vanished) or fall back
///
/// `on_missing` receives the violated constraint name, if the server reported one.
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing(db_err.constraint());
        }
    }
    map_db_error(e)
}

pub fn user_not_found(id: &UserId) -> DomainError {
    DomainError::UserNotFound(id.clone())
}

pub fn tweet_not_found(id: TweetId) -> DomainError {
    DomainError::TweetNotFound(id)
}

pub fn comment_not_found(id: CommentId) -> DomainError {
    DomainError::CommentNotFound(id)
}
