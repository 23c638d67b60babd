//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tweet_core::entities::{Comment, NewComment};
use tweet_core::traits::{CommentRepository, CommentWithAuthor, RepoResult};
use tweet_core::value_objects::{CommentId, TweetId};

use crate::models::{CommentModel, CommentWithAuthorModel};

use super::error::{
    comment_not_found, map_db_error, map_foreign_key_violation, tweet_not_found, user_not_found,
    COMMENT_AUTHOR_FK,
};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, body, tweet_id, user_id, created_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_tweet_with_authors(
        &self,
        tweet_id: TweetId,
    ) -> RepoResult<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentWithAuthorModel>(
            r"
            SELECT c.id, c.body, c.tweet_id, c.user_id, c.created_at,
                   u.username   AS author_username,
                   u.email      AS author_email,
                   u.first_name AS author_first_name,
                   u.last_name  AS author_last_name,
                   u.created_at AS author_created_at
            FROM comments c
            LEFT JOIN users u ON u.id = c.user_id
            WHERE c.tweet_id = $1
            ORDER BY c.created_at ASC, c.id ASC
            ",
        )
        .bind(tweet_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }

    #[instrument(skip(self, comment), fields(tweet_id = %comment.tweet_id, user_id = %comment.user_id))]
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        // The tweet or the author may be deleted between the service's lookups and this insert
        let row = sqlx::query_as::<_, CommentModel>(
            r"
            INSERT INTO comments (body, tweet_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, body, tweet_id, user_id, created_at
            ",
        )
        .bind(&comment.body)
        .bind(comment.tweet_id.into_inner())
        .bind(comment.user_id.as_str())
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                Some(COMMENT_AUTHOR_FK) => user_not_found(&comment.user_id),
                _ => tweet_not_found(comment.tweet_id),
            })
        })?;

        Ok(Comment::from(row))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CommentId) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }
}
