//! Identity service
//!
//! Registration, login, refresh-token rotation, logout and account
//! management. Refresh tokens are backed by `RefreshSession` rows so that
//! they can be revoked server-side.

use tracing::{debug, info, instrument, warn};
use tweet_common::config::AdminSeedConfig;
use tweet_common::AppError;
use tweet_core::entities::{NewUser, RefreshSession, Role, User};
use tweet_core::error::DomainError;
use tweet_core::value_objects::UserId;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, LogoutRequest, RefreshTokenRequest,
    RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// The authenticated caller as read from an access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: UserId,
    pub roles: Vec<Role>,
}

impl Caller {
    pub fn new(user_id: UserId, roles: Vec<Role>) -> Self {
        Self { user_id, roles }
    }

    #[inline]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Identity service
pub struct IdentityService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> IdentityService<'a> {
    /// Create a new IdentityService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and sign them in
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        self.ensure_available(&request.email, &request.username)
            .await?;

        let password_hash = self
            .ctx
            .password_service()
            .validate_and_hash(&request.password)?;

        let user = User::new(NewUser {
            username: request.username,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
        });
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        self.sign_in(&user, Vec::new()).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(&user.id)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self
            .ctx
            .password_service()
            .verify(&request.password, &password_hash)?
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        let roles = self.ctx.user_repo().roles(&user.id).await?;

        info!(user_id = %user.id, "User logged in");
        self.sign_in(&user, roles).await
    }

    /// Exchange a refresh token for a new pair, revoking the old session
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let session = self.active_session(&request.refresh_token).await?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(&session.user_id)
            .await?
            .ok_or(AppError::SessionRevoked)?;

        // Only one of several concurrent refreshes with the same token may rotate it
        if !self.ctx.session_repo().revoke(session.id).await? {
            warn!(user_id = %user.id, session_id = %session.id, "Refresh token reused during rotation");
            return Err(AppError::SessionRevoked.into());
        }
        let roles = self.ctx.user_repo().roles(&user.id).await?;

        debug!(user_id = %user.id, old_session = %session.id, "Refresh session rotated");
        self.sign_in(&user, roles).await
    }

    /// Revoke one refresh session, or all of the caller's sessions when no token is given
    #[instrument(skip(self, request))]
    pub async fn logout(&self, caller: Option<&UserId>, request: LogoutRequest) -> ServiceResult<()> {
        let caller = caller.ok_or(ServiceError::Unauthenticated)?;

        match request.refresh_token {
            Some(token) => {
                let session = self.active_session(&token).await?;
                if session.user_id != *caller {
                    warn!(user_id = %caller, "Logout with another user's refresh token");
                    return Err(AppError::InvalidToken.into());
                }
                let revoked = self.ctx.session_repo().revoke(session.id).await?;
                info!(user_id = %caller, session_id = %session.id, revoked, "Session revoked");
            }
            None => {
                let revoked = self.ctx.session_repo().revoke_all_for_user(caller).await?;
                info!(user_id = %caller, revoked, "All sessions revoked");
            }
        }

        Ok(())
    }

    /// Profile of the caller, including email and roles
    #[instrument(skip(self))]
    pub async fn current_user(&self, caller: Option<&UserId>) -> ServiceResult<CurrentUserResponse> {
        let caller = caller.ok_or(ServiceError::Unauthenticated)?;
        let user = self.find_user(caller).await?;
        let roles = self.ctx.user_repo().roles(caller).await?;

        Ok(CurrentUserResponse::new(&user, &roles))
    }

    /// Delete the caller's own account
    #[instrument(skip(self))]
    pub async fn delete_account(&self, caller: Option<&UserId>) -> ServiceResult<()> {
        let caller = caller.ok_or(ServiceError::Unauthenticated)?;
        self.find_user(caller).await?;

        self.ctx.user_repo().delete(caller).await?;

        info!(user_id = %caller, "Account deleted");
        Ok(())
    }

    /// Delete any user; requires the Admin role
    #[instrument(skip(self, caller))]
    pub async fn delete_user(&self, caller: Option<&Caller>, user_id: &UserId) -> ServiceResult<()> {
        let admin = require_role(caller, Role::Admin)?;
        self.find_user(user_id).await?;

        self.ctx.user_repo().delete(user_id).await?;

        info!(user_id = %user_id, admin_id = %admin.user_id, "User deleted by admin");
        Ok(())
    }

    /// Role-check probe
    pub fn admin_only(&self, caller: Option<&Caller>) -> ServiceResult<&'static str> {
        require_role(caller, Role::Admin)?;
        Ok("Admin only")
    }

    /// Ensure an Admin account exists
    ///
    /// Does nothing if some user already holds Admin. Otherwise promotes the
    /// account with the configured email, creating it first if needed.
    /// Returns the id of the account that was granted Admin.
    #[instrument(skip(self, seed), fields(email = %seed.email))]
    pub async fn seed_admin(&self, seed: &AdminSeedConfig) -> ServiceResult<Option<UserId>> {
        let users = self.ctx.user_repo();

        if users.any_with_role(Role::Admin).await? {
            debug!("Admin already present, skipping seed");
            return Ok(None);
        }

        let user = match users.find_by_email(&seed.email).await? {
            Some(user) => user,
            None => {
                if users.username_exists(&seed.username).await? {
                    return Err(DomainError::UsernameAlreadyExists.into());
                }
                let password_hash = self.ctx.password_service().validate_and_hash(&seed.password)?;
                let user = User::new(NewUser {
                    username: seed.username.clone(),
                    email: seed.email.clone(),
                    first_name: String::new(),
                    last_name: String::new(),
                });
                users.create(&user, &password_hash).await?;
                user
            }
        };

        users.add_role(&user.id, Role::Admin).await?;

        info!(user_id = %user.id, "Admin role granted");
        Ok(Some(user.id))
    }

    async fn ensure_available(&self, email: &str, username: &str) -> ServiceResult<()> {
        if self.ctx.user_repo().email_exists(email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        Ok(())
    }

    /// Open a refresh session and issue tokens bound to it
    async fn sign_in(&self, user: &User, roles: Vec<Role>) -> ServiceResult<AuthResponse> {
        let jwt = self.ctx.jwt_service();
        let session = RefreshSession::open(user.id.clone(), jwt.refresh_token_expiry());
        self.ctx.session_repo().create(&session).await?;

        let tokens = jwt.generate_token_pair(&user.id, &roles, session.id)?;

        Ok(AuthResponse::new(
            tokens,
            CurrentUserResponse::new(user, &roles),
        ))
    }

    async fn active_session(&self, refresh_token: &str) -> ServiceResult<RefreshSession> {
        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;
        let session_id = claims.session_id.ok_or(AppError::InvalidToken)?;

        let session = self
            .ctx
            .session_repo()
            .find_active(session_id)
            .await?
            .ok_or(AppError::SessionRevoked)?;

        if session.user_id != user_id {
            return Err(AppError::InvalidToken.into());
        }

        Ok(session)
    }

    async fn find_user(&self, user_id: &UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user_id.clone()).into())
    }
}

fn require_role(caller: Option<&Caller>, role: Role) -> ServiceResult<&Caller> {
    let caller = caller.ok_or(ServiceError::Unauthenticated)?;
    if !caller.has_role(role) {
        warn!(user_id = %caller.user_id, role = %role, "Missing role");
        return Err(DomainError::MissingRole(role.to_string()).into());
    }
    Ok(caller)
}
