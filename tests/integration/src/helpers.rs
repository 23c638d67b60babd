//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tweet_api::{create_app, create_app_state};
use tweet_common::{init_tracing, AppConfig, TracingConfig};
use tweet_core::{Role, UserId, UserRepository};
use tweet_db::{create_pool, DatabaseConfig, PgPool, PgUserRepository};

use crate::fixtures::{AuthResponse, LoginRequest, RegisterRequest};

/// Workspace migrations, independent of the test's working directory
const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations");

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub pool: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        // Shared by every test in the binary; only the first call installs it
        init_tracing(TracingConfig::default());

        let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            pool,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(bearer(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(bearer(self.client.post(self.url(path)), token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request with auth token and no body
    pub async fn post_empty_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(bearer(self.client.post(self.url(path)), token).send().await?)
    }

    /// Make a DELETE request without credentials
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(bearer(self.client.delete(self.url(path)), token).send().await?)
    }

    /// Register a fresh user and return their request and tokens
    pub async fn register(&self) -> Result<(RegisterRequest, AuthResponse)> {
        let request = RegisterRequest::unique();
        let response = self.post("/user/register", &request).await?;
        let auth = assert_json(response, StatusCode::CREATED).await?;
        Ok((request, auth))
    }

    /// Log in again, picking up roles granted since registration
    pub async fn login(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let response = self
            .post("/user/login", &LoginRequest::from_register(request))
            .await?;
        assert_json(response, StatusCode::OK).await
    }

    /// Grant Admin directly in the database
    pub async fn promote_to_admin(&self, user_id: &str) -> Result<()> {
        PgUserRepository::new(self.pool.clone())
            .add_role(&UserId::new(user_id), Role::Admin)
            .await?;
        Ok(())
    }
}

fn bearer(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header("Authorization", format!("Bearer {token}"))
}

/// Configuration from the environment with test-friendly defaults
///
/// Only `DATABASE_URL` must be set.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    AppConfig::from_lookup(|key| {
        std::env::var(key).ok().or_else(|| match key {
            "API_PORT" => Some("0".to_string()),
            "JWT_SECRET" => Some("integration-test-secret-that-is-long-enough".to_string()),
            "DATABASE_MIGRATIONS_DIR" => Some(MIGRATIONS_DIR.to_string()),
            "RATE_LIMIT_REQUESTS_PER_SECOND" => Some("1000".to_string()),
            "RATE_LIMIT_BURST" => Some("1000".to_string()),
            _ => None,
        })
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
