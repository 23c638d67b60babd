//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the database pool (for readiness probes) and configuration.

use std::sync::Arc;

use tweet_common::{AppConfig, JwtService};
use tweet_db::PgPool;
use tweet_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    pool: PgPool,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, pool: PgPool, config: AppConfig) -> Self {
        Self {
            service_context: Arc::new(service_context),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the JWT service from the service context
    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("config", &"AppConfig")
            .finish_non_exhaustive()
    }
}
