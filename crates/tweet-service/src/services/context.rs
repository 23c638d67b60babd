//! Service context - dependency container for services
//!
//! Holds the repositories and auth helpers needed by services. Services
//! borrow the context per request, so it is cheap to share behind an `Arc`.

use std::sync::Arc;

use tweet_common::auth::{JwtService, PasswordService};
use tweet_core::traits::{
    CommentRepository, RefreshSessionRepository, TweetRepository, UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    tweet_repo: Arc<dyn TweetRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    session_repo: Arc<dyn RefreshSessionRepository>,

    // Auth
    jwt_service: Arc<JwtService>,
    password_service: Arc<PasswordService>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        tweet_repo: Arc<dyn TweetRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        session_repo: Arc<dyn RefreshSessionRepository>,
        jwt_service: Arc<JwtService>,
        password_service: Arc<PasswordService>,
    ) -> Self {
        Self {
            user_repo,
            tweet_repo,
            comment_repo,
            session_repo,
            jwt_service,
            password_service,
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn tweet_repo(&self) -> &dyn TweetRepository {
        self.tweet_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn session_repo(&self) -> &dyn RefreshSessionRepository {
        self.session_repo.as_ref()
    }

    // === Auth ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        self.password_service.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("password_policy", self.password_service.policy())
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    tweet_repo: Option<Arc<dyn TweetRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    session_repo: Option<Arc<dyn RefreshSessionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<Arc<PasswordService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn tweet_repo(mut self, repo: Arc<dyn TweetRepository>) -> Self {
        self.tweet_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn RefreshSessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn password_service(mut self, service: Arc<PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// The password service falls back to the default policy when unset.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext::new(
            required(self.user_repo, "user_repo")?,
            required(self.tweet_repo, "tweet_repo")?,
            required(self.comment_repo, "comment_repo")?,
            required(self.session_repo, "session_repo")?,
            required(self.jwt_service, "jwt_service")?,
            self.password_service.unwrap_or_default(),
        ))
    }
}
