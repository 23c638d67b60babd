//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in tweet-core.

mod comment;
mod error;
mod refresh_session;
mod tweet;
mod user;

pub use comment::PgCommentRepository;
pub use refresh_session::PgRefreshSessionRepository;
pub use tweet::PgTweetRepository;
pub use user::PgUserRepository;
