//! Comment entity <-> model mapper

use tweet_core::entities::{Comment, User};
use tweet_core::traits::CommentWithAuthor;
use tweet_core::value_objects::{CommentId, TweetId, UserId};

use crate::models::{CommentModel, CommentWithAuthorModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::new(model.id),
            tweet_id: TweetId::new(model.tweet_id),
            user_id: model.user_id.map(UserId::new),
            body: model.body,
            created_at: model.created_at,
        }
    }
}

impl From<CommentWithAuthorModel> for CommentWithAuthor {
    fn from(model: CommentWithAuthorModel) -> Self {
        // All author columns come from the same LEFT JOIN, so they are either
        // all present or all NULL.
        let author = match (
            model.user_id.clone(),
            model.author_username,
            model.author_email,
            model.author_created_at,
        ) {
            (Some(id), Some(username), Some(email), Some(created_at)) => Some(User {
                id: UserId::new(id),
                username,
                email,
                first_name: model.author_first_name.unwrap_or_default(),
                last_name: model.author_last_name.unwrap_or_default(),
                created_at,
            }),
            _ => None,
        };

        CommentWithAuthor {
            comment: Comment {
                id: CommentId::new(model.id),
                tweet_id: TweetId::new(model.tweet_id),
                user_id: model.user_id.map(UserId::new),
                body: model.body,
                created_at: model.created_at,
            },
            author,
        }
    }
}
