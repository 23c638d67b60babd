//! Password hashing, verification and policy checks
//!
//! Uses Argon2id for password hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::PasswordPolicy;
use crate::error::AppError;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if the hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Check a password against a policy, reporting the first unmet rule
///
/// # Errors
/// Returns `AppError::WeakPassword` naming the unmet rule
pub fn validate_password(policy: &PasswordPolicy, password: &str) -> Result<(), AppError> {
    if password.chars().count() < policy.min_length {
        return Err(AppError::WeakPassword(format!(
            "must be at least {} characters long",
            policy.min_length
        )));
    }

    if policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::WeakPassword(
            "must contain at least one digit".to_string(),
        ));
    }

    if policy.require_uppercase && !password.chars().any(char::is_uppercase) {
        return Err(AppError::WeakPassword(
            "must contain at least one uppercase letter".to_string(),
        ));
    }

    if policy.require_lowercase && !password.chars().any(char::is_lowercase) {
        return Err(AppError::WeakPassword(
            "must contain at least one lowercase letter".to_string(),
        ));
    }

    if policy.require_non_alphanumeric && password.chars().all(char::is_alphanumeric) {
        return Err(AppError::WeakPassword(
            "must contain at least one non-alphanumeric character".to_string(),
        ));
    }

    Ok(())
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService {
    policy: PasswordPolicy,
}

impl PasswordService {
    /// Create a password service enforcing the given policy
    #[must_use]
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Validate against the policy, then hash
    ///
    /// # Errors
    /// Returns `AppError::WeakPassword` or a hashing failure
    pub fn validate_and_hash(&self, password: &str) -> Result<String, AppError> {
        validate_password(&self.policy, password)?;
        hash_password(password)
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if the hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(password, hash)
    }

    /// Verify a password and return an error if invalid
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if self.verify(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}
