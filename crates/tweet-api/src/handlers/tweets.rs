//! Tweet handlers
//!
//! Reads are public. Mutations with a body require `AuthUser`, which rejects
//! before the body is parsed; deletes pass the optional caller through so the
//! service decides between 401 and success.

use axum::{extract::State, Json};
use tweet_service::{
    AddCommentRequest, AddTweetRequest, IdentityService, TweetDetailResponse, TweetResponse,
    TweetService,
};

use crate::extractors::{
    AuthUser, OptionalAuthUser, PathParams, TweetPath, UserPath, UserTweetPath, ValidatedJson,
};
use crate::response::{ApiResult, Empty, ErrorBody, NoContent};
use crate::state::AppState;

/// List all tweets
#[utoipa::path(
    get,
    path = "/tweets",
    tag = "tweets",
    responses((status = 200, description = "All tweets, oldest first", body = [TweetResponse]))
)]
pub async fn list_tweets(State(state): State<AppState>) -> ApiResult<Json<Vec<TweetResponse>>> {
    let tweets = TweetService::new(state.service_context()).list_tweets().await?;
    Ok(Json(tweets))
}

/// Tweets owned by a user
#[utoipa::path(
    get,
    path = "/tweets/{id}",
    tag = "tweets",
    params(("id" = String, Path, description = "Owner's user id")),
    responses(
        (status = 200, description = "The user's tweets", body = [TweetResponse]),
        (status = 404, description = "Unknown user", body = ErrorBody)
    )
)]
pub async fn get_tweets_by_user(
    State(state): State<AppState>,
    PathParams(path): PathParams<UserPath>,
) -> ApiResult<Json<Vec<TweetResponse>>> {
    let user_id = path.user_id()?;
    let tweets = TweetService::new(state.service_context())
        .get_tweets_by_user(&user_id)
        .await?;
    Ok(Json(tweets))
}

/// A tweet with its comments
#[utoipa::path(
    get,
    path = "/tweets/{id}/{tweet_id}",
    tag = "tweets",
    params(
        ("id" = String, Path, description = "Owner's user id"),
        ("tweet_id" = i64, Path, description = "Tweet id")
    ),
    responses(
        (status = 200, description = "Tweet with comments in creation order", body = TweetDetailResponse),
        (status = 404, description = "No such tweet for that owner", body = ErrorBody)
    )
)]
pub async fn get_tweet_detail(
    State(state): State<AppState>,
    PathParams(path): PathParams<UserTweetPath>,
) -> ApiResult<Json<TweetDetailResponse>> {
    let detail = TweetService::new(state.service_context())
        .get_tweet_detail(&path.user_id()?, path.tweet_id()?)
        .await?;
    Ok(Json(detail))
}

/// Post a tweet as the caller
#[utoipa::path(
    post,
    path = "/tweets/add",
    tag = "tweets",
    request_body = AddTweetRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tweet created"),
        (status = 400, description = "Missing, blank or too long body", body = ErrorBody),
        (status = 401, description = "No caller", body = ErrorBody),
        (status = 404, description = "Caller's account no longer exists", body = ErrorBody)
    )
)]
pub async fn add_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddTweetRequest>,
) -> ApiResult<Empty> {
    TweetService::new(state.service_context())
        .add_tweet(Some(&auth.user_id), request)
        .await?;
    Ok(Empty)
}

/// Comment on a tweet as the caller
#[utoipa::path(
    post,
    path = "/tweets/{id}/{tweet_id}/add-comment",
    tag = "tweets",
    params(
        ("id" = String, Path, description = "Tweet owner's user id"),
        ("tweet_id" = i64, Path, description = "Tweet id")
    ),
    request_body = AddCommentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Comment created"),
        (status = 400, description = "Bad body or owner mismatch", body = ErrorBody),
        (status = 401, description = "No caller", body = ErrorBody),
        (status = 404, description = "No such tweet, or caller's account no longer exists", body = ErrorBody)
    )
)]
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<UserTweetPath>,
    ValidatedJson(request): ValidatedJson<AddCommentRequest>,
) -> ApiResult<Empty> {
    TweetService::new(state.service_context())
        .add_comment(Some(&auth.user_id), &path.user_id()?, path.tweet_id()?, request)
        .await?;
    Ok(Empty)
}

/// Delete one of the caller's tweets
#[utoipa::path(
    delete,
    path = "/tweets/{id}",
    tag = "tweets",
    params(("id" = i64, Path, description = "Tweet id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Tweet and its comments deleted"),
        (status = 401, description = "No caller", body = ErrorBody),
        (status = 403, description = "Caller does not own the tweet", body = ErrorBody),
        (status = 404, description = "No such tweet", body = ErrorBody)
    )
)]
pub async fn delete_tweet(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    PathParams(path): PathParams<TweetPath>,
) -> ApiResult<NoContent> {
    TweetService::new(state.service_context())
        .delete_tweet(auth.user_id(), path.tweet_id()?)
        .await?;
    Ok(NoContent)
}

/// Role-check probe for Admins
#[utoipa::path(
    get,
    path = "/tweets/admin-only",
    tag = "tweets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller is an Admin", body = String),
        (status = 401, description = "No caller", body = ErrorBody),
        (status = 403, description = "Caller lacks the Admin role", body = ErrorBody)
    )
)]
pub async fn admin_only(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
) -> ApiResult<&'static str> {
    let message =
        IdentityService::new(state.service_context()).admin_only(auth.caller().as_ref())?;
    Ok(message)
}
