//! Repository traits (ports)

mod repositories;

pub use repositories::{
    CommentRepository, CommentWithAuthor, RefreshSessionRepository, RepoResult, TweetRepository,
    TweetWithAuthor, UserRepository,
};
