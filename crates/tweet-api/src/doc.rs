//! OpenAPI documentation
//!
//! Served by Swagger UI at `/swagger-ui`, with the raw document at
//! `/api-docs/openapi.json`.

use tweet_service::{
    AddCommentRequest, AddTweetRequest, AuthResponse, AuthorResponse, CommentResponse,
    CurrentUserResponse, HealthChecks, HealthResponse, LoginRequest, LogoutRequest,
    ReadinessResponse, RefreshTokenRequest, RegisterRequest, TweetDetailResponse, TweetResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{comments, health, identity, tweets};
use crate::response::{ErrorBody, ErrorDetail};

/// Registers the bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token from POST /user/login"))
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tweet API",
        description = "Users post tweets and comment on each other's tweets."
    ),
    paths(
        tweets::list_tweets,
        tweets::get_tweets_by_user,
        tweets::get_tweet_detail,
        tweets::add_tweet,
        tweets::add_comment,
        tweets::delete_tweet,
        tweets::admin_only,
        comments::delete_comment,
        identity::register,
        identity::login,
        identity::refresh,
        identity::logout,
        identity::current_user,
        identity::delete_account,
        identity::delete_user,
        health::health_check,
        health::readiness_check,
    ),
    components(schemas(
        AddTweetRequest,
        AddCommentRequest,
        RegisterRequest,
        LoginRequest,
        RefreshTokenRequest,
        LogoutRequest,
        TweetResponse,
        TweetDetailResponse,
        CommentResponse,
        AuthorResponse,
        CurrentUserResponse,
        AuthResponse,
        HealthResponse,
        ReadinessResponse,
        HealthChecks,
        ErrorBody,
        ErrorDetail,
    )),
    tags(
        (name = "tweets", description = "Tweets and comments"),
        (name = "identity", description = "Accounts and tokens"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
