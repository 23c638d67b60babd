//! # tweet-common
//!
//! Shared utilities including configuration, error handling, authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, validate_password, verify_password, Claims, JwtService, PasswordService,
    TokenPair, TokenType,
};
pub use config::{
    AdminSeedConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, PasswordPolicy, RateLimitConfig, ServerConfig,
};
pub use error::{domain_status, AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
