//! Tweet entity <-> model mapper

use tweet_core::entities::{Tweet, User};
use tweet_core::traits::TweetWithAuthor;
use tweet_core::value_objects::{TweetId, UserId};

use crate::models::{TweetModel, TweetWithAuthorModel};

impl From<TweetModel> for Tweet {
    fn from(model: TweetModel) -> Self {
        Tweet {
            id: TweetId::new(model.id),
            user_id: UserId::new(model.user_id),
            body: model.body,
            created_at: model.created_at,
        }
    }
}

impl From<TweetWithAuthorModel> for TweetWithAuthor {
    fn from(model: TweetWithAuthorModel) -> Self {
        let author = User {
            id: UserId::new(model.user_id.clone()),
            username: model.author_username,
            email: model.author_email,
            first_name: model.author_first_name,
            last_name: model.author_last_name,
            created_at: model.author_created_at,
        };

        TweetWithAuthor {
            tweet: Tweet {
                id: TweetId::new(model.id),
                user_id: UserId::new(model.user_id),
                body: model.body,
                created_at: model.created_at,
            },
            author,
        }
    }
}
