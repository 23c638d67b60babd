//! # tweet-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `tweet-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! The user → tweet → comment cascade rules live in the schema
//! (`migrations/`), not in this crate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tweet_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use tweet_db::repositories::PgTweetRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool, "./migrations").await?;
//!     let tweets = PgTweetRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgRefreshSessionRepository, PgTweetRepository, PgUserRepository,
};
