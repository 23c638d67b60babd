//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate`. Tweet and comment
//! bodies are checked by the domain (`validate_body`) so that a missing body
//! and a blank body report the same error.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

// ============================================================================
// Tweet Requests
// ============================================================================

/// Add tweet request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AddTweetRequest {
    /// Tweet text, 1-280 characters (checked by `validate_body`, not a validator rule)
    #[schema(example = "Hello, world")]
    pub body: Option<String>,
}

/// Add comment request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct AddCommentRequest {
    /// Comment text, 1-280 characters (checked by `validate_body`, not a validator rule)
    #[schema(example = "Nice tweet")]
    pub body: Option<String>,
}

// ============================================================================
// Identity Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 64, message = "Username must be 2-64 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Checked against the configured password policy
    pub password: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Logout request (optional refresh token to revoke)
#[derive(Debug, Clone, Deserialize, Default, Validate, ToSchema)]
pub struct LogoutRequest {
    /// Revoke only this session; all sessions are revoked when omitted
    pub refresh_token: Option<String>,
}
