//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Optional fields
//! are omitted instead of being written as `null`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

// ============================================================================
// User Responses
// ============================================================================

/// Public profile attached to tweets and comments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Current user response (includes private fields)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Tweet Responses
// ============================================================================

/// Tweet without comments
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TweetResponse {
    pub id: i64,
    pub body: String,
    pub user: AuthorResponse,
    pub created_at: DateTime<Utc>,
}

/// Tweet with its comments in creation order
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TweetDetailResponse {
    pub id: i64,
    pub body: String,
    pub user: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentResponse>,
}

/// Comment on a tweet
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub body: String,
    /// Absent once the author account has been deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthorResponse>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
