//! Path parameter extractors
//!
//! The first segment under `/tweets/` is shared by several routes, so it is
//! always named `id` in the router and renamed here.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tweet_core::value_objects::{CommentId, TweetId, UserId};

use crate::response::ApiError;

/// `Path` with rejections rendered as `ApiError`
#[derive(Debug, Clone)]
pub struct PathParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for PathParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(PathParams(inner))
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::parse(raw).map_err(|_| ApiError::invalid_path("Invalid user_id"))
}

fn parse_tweet_id(raw: &str) -> Result<TweetId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path("Invalid tweet_id format"))
}

/// `/tweets/:id` and `/users/:id` where `id` is a user
#[derive(Debug, Deserialize)]
pub struct UserPath {
    #[serde(rename = "id")]
    pub user_id: String,
}

impl UserPath {
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        parse_user_id(&self.user_id)
    }
}

/// `DELETE /tweets/:id`
#[derive(Debug, Deserialize)]
pub struct TweetPath {
    #[serde(rename = "id")]
    pub tweet_id: String,
}

impl TweetPath {
    pub fn tweet_id(&self) -> Result<TweetId, ApiError> {
        parse_tweet_id(&self.tweet_id)
    }
}

/// `/tweets/:id/:tweet_id` where `id` is the tweet's owner
#[derive(Debug, Deserialize)]
pub struct UserTweetPath {
    #[serde(rename = "id")]
    pub user_id: String,
    pub tweet_id: String,
}

impl UserTweetPath {
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        parse_user_id(&self.user_id)
    }

    pub fn tweet_id(&self) -> Result<TweetId, ApiError> {
        parse_tweet_id(&self.tweet_id)
    }
}

/// `/comments/:comment_id`
#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub comment_id: String,
}

impl CommentPath {
    pub fn comment_id(&self) -> Result<CommentId, ApiError> {
        self.comment_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))
    }
}
