//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod refresh_session;
mod tweet;
mod user;

pub use comment::{CommentModel, CommentWithAuthorModel};
pub use refresh_session::RefreshSessionModel;
pub use tweet::{TweetModel, TweetWithAuthorModel};
pub use user::{UserModel, UserRoleModel};
