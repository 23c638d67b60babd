//! Route definitions
//!
//! Paths follow the slugified controller actions clients already use.
//! The first segment below `/tweets/` is a user id on reads and comment
//! creation, and a tweet id on `DELETE`; it is named `:id` throughout
//! because the router requires one name per position.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{comments, health, identity, tweets};
use crate::state::AppState;

/// Create the API router (health probes are mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(tweet_routes())
        .merge(comment_routes())
        .merge(identity_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn tweet_routes() -> Router<AppState> {
    Router::new()
        .route("/tweets", get(tweets::list_tweets))
        .route("/tweets/add", post(tweets::add_tweet))
        .route("/tweets/admin-only", get(tweets::admin_only))
        .route(
            "/tweets/:id",
            get(tweets::get_tweets_by_user).delete(tweets::delete_tweet),
        )
        .route("/tweets/:id/:tweet_id", get(tweets::get_tweet_detail))
        .route(
            "/tweets/:id/:tweet_id/add-comment",
            post(tweets::add_comment),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new().route("/comments/:comment_id", delete(comments::delete_comment))
}

fn identity_routes() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(identity::register))
        .route("/user/login", post(identity::login))
        .route("/user/refresh", post(identity::refresh))
        .route("/user/logout", post(identity::logout))
        .route("/user/manage/info", get(identity::current_user))
        .route("/user/manage", delete(identity::delete_account))
        .route("/users/:id", delete(identity::delete_user))
}
