//! Comment handlers

use axum::extract::State;
use tweet_service::TweetService;

use crate::extractors::{CommentPath, OptionalAuthUser, PathParams};
use crate::response::{ApiResult, ErrorBody, NoContent};
use crate::state::AppState;

/// Delete one of the caller's comments
#[utoipa::path(
    delete,
    path = "/comments/{comment_id}",
    tag = "tweets",
    params(("comment_id" = i64, Path, description = "Comment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "No caller", body = ErrorBody),
        (status = 403, description = "Caller did not write the comment", body = ErrorBody),
        (status = 404, description = "No such comment", body = ErrorBody)
    )
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    PathParams(path): PathParams<CommentPath>,
) -> ApiResult<NoContent> {
    TweetService::new(state.service_context())
        .delete_comment(auth.user_id(), path.comment_id()?)
        .await?;
    Ok(NoContent)
}
