//! Test fixtures and wire types
//!
//! Request bodies and the subset of response fields the tests inspect.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix across tests and test runs sharing a database
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}{n}", nanos % 1_000_000_000_000)
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("user{suffix}@example.com"),
            password: "pass123".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct BodyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl BodyRequest {
    pub fn text(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
        }
    }

    pub fn missing() -> Self {
        Self { body: None }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: CurrentUser,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Tweet {
    pub id: i64,
    pub body: String,
    pub user: Author,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct TweetDetail {
    pub id: i64,
    pub body: String,
    pub user: Author,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub body: String,
    pub user: Option<Author>,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
