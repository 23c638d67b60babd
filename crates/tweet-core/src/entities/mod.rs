//! Domain entities - core business objects

mod comment;
mod role;
mod session;
mod tweet;
mod user;

pub use comment::{Comment, NewComment};
pub use role::{Role, RoleParseError};
pub use session::RefreshSession;
pub use tweet::{validate_body, NewTweet, Tweet, MAX_BODY_CHARS};
pub use user::{NewUser, User};
