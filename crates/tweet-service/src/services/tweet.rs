//! Tweet service
//!
//! Reads and mutations on the user → tweet → comment aggregate. Mutations
//! take the caller's id as `Option<&UserId>` and fail with
//! `ServiceError::Unauthenticated` when it is absent.

use tracing::{info, instrument, warn};
use tweet_core::entities::{NewComment, NewTweet, User};
use tweet_core::error::DomainError;
use tweet_core::value_objects::{CommentId, TweetId, UserId};

use crate::dto::{
    AddCommentRequest, AddTweetRequest, TweetDetailBuilder, TweetDetailResponse, TweetResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Tweet service
pub struct TweetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TweetService<'a> {
    /// Create a new TweetService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All tweets with their authors, oldest first
    #[instrument(skip(self))]
    pub async fn list_tweets(&self) -> ServiceResult<Vec<TweetResponse>> {
        let rows = self.ctx.tweet_repo().list_with_authors().await?;
        Ok(rows.into_iter().map(TweetResponse::from).collect())
    }

    /// Tweets owned by a user
    #[instrument(skip(self))]
    pub async fn get_tweets_by_user(&self, user_id: &UserId) -> ServiceResult<Vec<TweetResponse>> {
        let owner = self.find_user(user_id).await?;
        let tweets = self.ctx.tweet_repo().find_by_user(user_id).await?;

        Ok(tweets
            .into_iter()
            .map(|tweet| TweetResponse::new(tweet, &owner))
            .collect())
    }

    /// A tweet owned by `user_id`, with its comments in creation order
    #[instrument(skip(self))]
    pub async fn get_tweet_detail(
        &self,
        user_id: &UserId,
        tweet_id: TweetId,
    ) -> ServiceResult<TweetDetailResponse> {
        let tweet = self
            .ctx
            .tweet_repo()
            .find_by_id(tweet_id)
            .await?
            .filter(|tweet| tweet.is_owned_by(user_id))
            .ok_or(DomainError::TweetNotFound(tweet_id))?;

        let owner = self.find_user(user_id).await?;
        let comments = self
            .ctx
            .comment_repo()
            .find_by_tweet_with_authors(tweet_id)
            .await?;

        Ok(TweetDetailBuilder::new(tweet, &owner)
            .comments(comments)
            .build())
    }

    /// Post a tweet as the caller
    #[instrument(skip(self, request))]
    pub async fn add_tweet(
        &self,
        caller: Option<&UserId>,
        request: AddTweetRequest,
    ) -> ServiceResult<TweetId> {
        let caller = caller.ok_or(ServiceError::Unauthenticated)?;
        let new_tweet = NewTweet::new(caller.clone(), request.body)?;

        let tweet = self.ctx.tweet_repo().create(&new_tweet).await?;

        info!(tweet_id = %tweet.id, user_id = %caller, "Tweet created");
        Ok(tweet.id)
    }

    /// Comment on `tweet_id` as the caller; `tweet_user_id` must name the tweet's owner
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        caller: Option<&UserId>,
        tweet_user_id: &UserId,
        tweet_id: TweetId,
        request: AddCommentRequest,
    ) -> ServiceResult<CommentId> {
        let caller = caller.ok_or(ServiceError::Unauthenticated)?;
        let new_comment = NewComment::new(tweet_id, caller.clone(), request.body)?;

        let tweet = self
            .ctx
            .tweet_repo()
            .find_by_id(tweet_id)
            .await?
            .ok_or(DomainError::TweetNotFound(tweet_id))?;

        if !tweet.is_owned_by(tweet_user_id) {
            warn!(tweet_id = %tweet_id, owner = %tweet.user_id, claimed = %tweet_user_id, "Tweet owner mismatch");
            return Err(DomainError::TweetOwnerMismatch {
                tweet_id,
                user_id: tweet_user_id.clone(),
            }
            .into());
        }

        let comment = self.ctx.comment_repo().create(&new_comment).await?;

        info!(comment_id = %comment.id, tweet_id = %tweet_id, user_id = %caller, "Comment created");
        Ok(comment.id)
    }

    /// Delete one of the caller's tweets together with its comments
    #[instrument(skip(self))]
    pub async fn delete_tweet(&self, caller: Option<&UserId>, tweet_id: TweetId) -> ServiceResult<()> {
        let caller = caller.ok_or(ServiceError::Unauthenticated)?;

        let tweet = self
            .ctx
            .tweet_repo()
            .find_by_id(tweet_id)
            .await?
            .ok_or(DomainError::TweetNotFound(tweet_id))?;

        if !tweet.is_owned_by(caller) {
            warn!(tweet_id = %tweet_id, user_id = %caller, "Delete denied: not tweet owner");
            return Err(DomainError::NotTweetOwner.into());
        }

        self.ctx.tweet_repo().delete(tweet_id).await?;

        info!(tweet_id = %tweet_id, user_id = %caller, "Tweet deleted");
        Ok(())
    }

    /// Delete one of the caller's comments
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        caller: Option<&UserId>,
        comment_id: CommentId,
    ) -> ServiceResult<()> {
        let caller = caller.ok_or(ServiceError::Unauthenticated)?;

        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;

        if !comment.is_authored_by(caller) {
            warn!(comment_id = %comment_id, user_id = %caller, "Delete denied: not comment owner");
            return Err(DomainError::NotCommentOwner.into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, user_id = %caller, "Comment deleted");
        Ok(())
    }

    async fn find_user(&self, user_id: &UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.clone()).into())
    }
}
