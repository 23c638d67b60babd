//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `tweet-db` provides the
//! PostgreSQL implementation. Cascade rules between users, tweets and
//! comments are enforced by the datastore, so `delete` on a parent
//! removes (or detaches) its children as part of the same statement.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Comment, NewComment, NewTweet, RefreshSession, Role, Tweet, User};
use crate::error::DomainError;
use crate::value_objects::{CommentId, TweetId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// A tweet together with its author, loaded in one query
#[derive(Debug, Clone)]
pub struct TweetWithAuthor {
    pub tweet: Tweet,
    pub author: User,
}

/// A comment together with its author; `author` is `None` for orphaned comments
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: Option<User>,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if username is already taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Hard delete a user; owned tweets cascade, authored comments are detached
    async fn delete(&self, id: &UserId) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: &UserId) -> RepoResult<Option<String>>;

    /// Roles granted to a user
    async fn roles(&self, id: &UserId) -> RepoResult<Vec<Role>>;

    /// Grant a role (no-op if already granted)
    async fn add_role(&self, id: &UserId, role: Role) -> RepoResult<()>;

    /// Check whether any user holds the role
    async fn any_with_role(&self, role: Role) -> RepoResult<bool>;
}

// ============================================================================
// Tweet Repository
// ============================================================================

#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// All tweets with their authors, oldest first
    async fn list_with_authors(&self) -> RepoResult<Vec<TweetWithAuthor>>;

    /// Tweets owned by a user, oldest first
    async fn find_by_user(&self, user_id: &UserId) -> RepoResult<Vec<Tweet>>;

    /// Find tweet by ID
    async fn find_by_id(&self, id: TweetId) -> RepoResult<Option<Tweet>>;

    /// Insert a tweet and return it with its generated id
    async fn create(&self, tweet: &NewTweet) -> RepoResult<Tweet>;

    /// Hard delete a tweet; its comments cascade
    async fn delete(&self, id: TweetId) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// Comments on a tweet with their authors, ordered by creation time then id
    async fn find_by_tweet_with_authors(&self, tweet_id: TweetId)
        -> RepoResult<Vec<CommentWithAuthor>>;

    /// Insert a comment and return it with its generated id
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// Hard delete a comment
    async fn delete(&self, id: CommentId) -> RepoResult<()>;
}

// ============================================================================
// Refresh Session Repository
// ============================================================================

#[async_trait]
pub trait RefreshSessionRepository: Send + Sync {
    /// Persist a new session
    async fn create(&self, session: &RefreshSession) -> RepoResult<()>;

    /// Find a session that is neither revoked nor expired
    async fn find_active(&self, id: Uuid) -> RepoResult<Option<RefreshSession>>;

    /// Revoke a single session; `false` if it was already revoked
    async fn revoke(&self, id: Uuid) -> RepoResult<bool>;

    /// Revoke every session of a user; returns how many were revoked
    async fn revoke_all_for_user(&self, user_id: &UserId) -> RepoResult<u64>;
}
