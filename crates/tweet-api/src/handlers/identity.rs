//! Identity handlers
//!
//! Registration, login, token refresh, logout and account management.

use axum::{extract::State, Json};
use tweet_service::{
    AuthResponse, CurrentUserResponse, IdentityService, LoginRequest, LogoutRequest,
    RefreshTokenRequest, RegisterRequest,
};

use crate::extractors::{AuthUser, OptionalValidatedJson, PathParams, UserPath, ValidatedJson};
use crate::response::{ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// Register a new user
#[utoipa::path(
    post,
    path = "/user/register",
    tag = "identity",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered and signed in", body = AuthResponse),
        (status = 400, description = "Invalid fields or weak password", body = ErrorBody),
        (status = 409, description = "Email or username taken", body = ErrorBody)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let response = IdentityService::new(state.service_context())
        .register(request)
        .await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/user/login",
    tag = "identity",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = IdentityService::new(state.service_context())
        .login(request)
        .await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new token pair
#[utoipa::path(
    post,
    path = "/user/refresh",
    tag = "identity",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair", body = AuthResponse),
        (status = 401, description = "Invalid, expired or revoked refresh token", body = ErrorBody)
    )
)]
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = IdentityService::new(state.service_context())
        .refresh(request)
        .await?;
    Ok(Json(response))
}

/// Revoke one refresh session, or all of them without a body
#[utoipa::path(
    post,
    path = "/user/logout",
    tag = "identity",
    request_body(content = LogoutRequest, description = "Omit to revoke every session"),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Signed out"),
        (status = 401, description = "Not signed in", body = ErrorBody)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    OptionalValidatedJson(request): OptionalValidatedJson<LogoutRequest>,
) -> ApiResult<NoContent> {
    IdentityService::new(state.service_context())
        .logout(Some(&auth.user_id), request.unwrap_or_default())
        .await?;
    Ok(NoContent)
}

/// The caller's profile
#[utoipa::path(
    get,
    path = "/user/manage/info",
    tag = "identity",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = CurrentUserResponse),
        (status = 401, description = "Not signed in", body = ErrorBody)
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user = IdentityService::new(state.service_context())
        .current_user(Some(&auth.user_id))
        .await?;
    Ok(Json(user))
}

/// Delete the caller's account with everything it owns
#[utoipa::path(
    delete,
    path = "/user/manage",
    tag = "identity",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not signed in", body = ErrorBody)
    )
)]
pub async fn delete_account(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    IdentityService::new(state.service_context())
        .delete_account(Some(&auth.user_id))
        .await?;
    Ok(NoContent)
}

/// Delete any user (Admin)
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "identity",
    params(("id" = String, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Caller lacks the Admin role", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    PathParams(path): PathParams<UserPath>,
) -> ApiResult<NoContent> {
    IdentityService::new(state.service_context())
        .delete_user(Some(&auth.caller()), &path.user_id()?)
        .await?;
    Ok(NoContent)
}
