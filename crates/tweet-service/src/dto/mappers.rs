//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs and
//! the builder that assembles a tweet with its comments.

use tweet_common::auth::TokenPair;
use tweet_core::entities::{Role, Tweet, User};
use tweet_core::traits::{CommentWithAuthor, TweetWithAuthor};

use super::responses::{
    AuthResponse, AuthorResponse, CommentResponse, CurrentUserResponse, TweetDetailResponse,
    TweetResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for AuthorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

impl CurrentUserResponse {
    pub fn new(user: &User, roles: &[Role]) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            roles: roles.iter().map(ToString::to_string).collect(),
            created_at: user.created_at,
        }
    }
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, user: CurrentUserResponse) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            user,
        }
    }
}

// ============================================================================
// Tweet Mappers
// ============================================================================

impl TweetResponse {
    /// Summary of a tweet owned by `author`
    pub fn new(tweet: Tweet, author: &User) -> Self {
        Self {
            id: tweet.id.into_inner(),
            body: tweet.body,
            user: AuthorResponse::from(author),
            created_at: tweet.created_at,
        }
    }
}

impl From<TweetWithAuthor> for TweetResponse {
    fn from(row: TweetWithAuthor) -> Self {
        Self::new(row.tweet, &row.author)
    }
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(row: CommentWithAuthor) -> Self {
        Self {
            id: row.comment.id.into_inner(),
            body: row.comment.body,
            user: row.author.as_ref().map(AuthorResponse::from),
            created_at: row.comment.created_at,
        }
    }
}

/// Assembles a `TweetDetailResponse` from a tweet, its owner and its comments
#[derive(Debug)]
pub struct TweetDetailBuilder {
    tweet: Tweet,
    author: AuthorResponse,
    comments: Vec<CommentResponse>,
}

impl TweetDetailBuilder {
    pub fn new(tweet: Tweet, author: &User) -> Self {
        Self {
            tweet,
            author: AuthorResponse::from(author),
            comments: Vec::new(),
        }
    }

    /// Attach comments; they are kept in the order given
    pub fn comments(mut self, comments: impl IntoIterator<Item = CommentWithAuthor>) -> Self {
        self.comments
            .extend(comments.into_iter().map(CommentResponse::from));
        self
    }

    pub fn build(self) -> TweetDetailResponse {
        TweetDetailResponse {
            id: self.tweet.id.into_inner(),
            body: self.tweet.body,
            user: self.author,
            created_at: self.tweet.created_at,
            comments: self.comments,
        }
    }
}
