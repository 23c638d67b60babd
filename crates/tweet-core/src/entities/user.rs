//! User entity - an account that owns tweets and comments

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a freshly generated id
    pub fn new(new_user: NewUser) -> Self {
        Self {
            id: UserId::generate(),
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            created_at: Utc::now(),
        }
    }

    /// "First Last", falling back to the username when both are blank
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// Check if this user is the given id
    #[inline]
    pub fn is(&self, id: &UserId) -> bool {
        &self.id == id
    }
}

/// Fields supplied at registration
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
