//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use tweet_common::{AppConfig, AppError, JwtService, PasswordService};
use tweet_db::{
    create_pool, run_migrations, PgCommentRepository, PgRefreshSessionRepository,
    PgTweetRepository, PgUserRepository,
};
use tweet_service::{IdentityService, ServiceContextBuilder};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes and API docs are mounted outside the rate limiter.
///
/// # Errors
/// Returns `AppError::Config` if the rate limiter settings are invalid
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    Ok(api
        .merge(health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// Connects to PostgreSQL, applies pending migrations and seeds the Admin
/// account when one is configured.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = tweet_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!(dir = %config.database.migrations_dir, "Migrations applied");
    }

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let password_service = Arc::new(PasswordService::new(config.password.clone()));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .tweet_repo(Arc::new(PgTweetRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .session_repo(Arc::new(PgRefreshSessionRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .password_service(password_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(seed) = &config.admin {
        IdentityService::new(&service_context)
            .seed_admin(seed)
            .await
            .map_err(AppError::from)?;
    }

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server until it fails
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, &address).await
}
