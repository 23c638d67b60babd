//! PostgreSQL implementation of TweetRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tweet_core::entities::{NewTweet, Tweet};
use tweet_core::traits::{RepoResult, TweetRepository, TweetWithAuthor};
use tweet_core::value_objects::{TweetId, UserId};

use crate::models::{TweetModel, TweetWithAuthorModel};

use super::error::{map_db_error, map_foreign_key_violation, tweet_not_found, user_not_found};

/// PostgreSQL implementation of TweetRepository
#[derive(Clone)]
pub struct PgTweetRepository {
    pool: PgPool,
}

impl PgTweetRepository {
    /// Create a new PgTweetRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetRepository for PgTweetRepository {
    #[instrument(skip(self))]
    async fn list_with_authors(&self) -> RepoResult<Vec<TweetWithAuthor>> {
        let rows = sqlx::query_as::<_, TweetWithAuthorModel>(
            r"
            SELECT t.id, t.body, t.user_id, t.created_at,
                   u.username   AS author_username,
                   u.email      AS author_email,
                   u.first_name AS author_first_name,
                   u.last_name  AS author_last_name,
                   u.created_at AS author_created_at
            FROM tweets t
            JOIN users u ON u.id = t.user_id
            ORDER BY t.created_at ASC, t.id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(TweetWithAuthor::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: &UserId) -> RepoResult<Vec<Tweet>> {
        let rows = sqlx::query_as::<_, TweetModel>(
            r"
            SELECT id, body, user_id, created_at
            FROM tweets
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Tweet::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: TweetId) -> RepoResult<Option<Tweet>> {
        let result = sqlx::query_as::<_, TweetModel>(
            r"
            SELECT id, body, user_id, created_at
            FROM tweets
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Tweet::from))
    }

    #[instrument(skip(self, tweet), fields(user_id = %tweet.user_id))]
    async fn create(&self, tweet: &NewTweet) -> RepoResult<Tweet> {
        let row = sqlx::query_as::<_, TweetModel>(
            r"
            INSERT INTO tweets (body, user_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, body, user_id, created_at
            ",
        )
        .bind(&tweet.body)
        .bind(tweet.user_id.as_str())
        .bind(tweet.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, |_| user_not_found(&tweet.user_id)))?;

        Ok(Tweet::from(row))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: TweetId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(tweet_not_found(id));
        }

        Ok(())
    }
}
