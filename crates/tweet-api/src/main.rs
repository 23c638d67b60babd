//! Tweet API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p tweet-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use tracing::{error, info};
use tweet_common::{try_init_tracing, AppConfig, TracingConfig};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        "Starting Tweet API Server..."
    );

    if let Err(e) = tweet_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
