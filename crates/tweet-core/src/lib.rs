//! # tweet-core
//!
//! Domain layer containing entities, value objects and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    validate_body, Comment, NewComment, NewTweet, NewUser, RefreshSession, Role, RoleParseError,
    Tweet, User, MAX_BODY_CHARS,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, CommentWithAuthor, RefreshSessionRepository, RepoResult, TweetRepository,
    TweetWithAuthor, UserRepository,
};
pub use value_objects::{CommentId, IdParseError, TweetId, UserId};
