//! Authentication extractors
//!
//! Read a bearer access token from the Authorization header and expose the
//! caller's id and the roles carried in its claims.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tweet_core::entities::Role;
use tweet_core::value_objects::UserId;
use tweet_service::Caller;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user extracted from an access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub roles: Vec<Role>,
}

impl AuthUser {
    pub fn new(user_id: UserId, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    /// The caller as services see it
    pub fn caller(&self) -> Caller {
        Caller::new(self.user_id.clone(), self.roles.clone())
    }

    fn from_token(state: &AppState, token: &str) -> Result<Self, ApiError> {
        let claims = state.jwt_service().validate_access_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Invalid access token");
            ApiError::from(e)
        })?;

        let user_id = claims.user_id()?;
        Ok(Self::new(user_id, claims.roles()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        Self::from_token(&AppState::from_ref(state), bearer.token())
    }
}

/// Optional authenticated user
///
/// `None` when no Authorization header is present; a present but invalid
/// token is still rejected.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref().map(|auth| &auth.user_id)
    }

    pub fn caller(&self) -> Option<Caller> {
        self.0.as_ref().map(AuthUser::caller)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
            Ok(TypedHeader(Authorization(bearer))) => {
                let auth = AuthUser::from_token(&AppState::from_ref(state), bearer.token())?;
                Ok(OptionalAuthUser(Some(auth)))
            }
            Err(_) => Ok(OptionalAuthUser(None)),
        }
    }
}
