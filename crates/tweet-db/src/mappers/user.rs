//! User entity <-> model mapper

use std::str::FromStr;

use tweet_core::entities::{Role, User};
use tweet_core::error::DomainError;
use tweet_core::value_objects::UserId;

use crate::models::{UserModel, UserRoleModel};

/// Convert UserModel to User entity (the password hash stays behind)
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
        }
    }
}

/// Convert a stored role row; unknown names indicate schema drift
impl TryFrom<UserRoleModel> for Role {
    type Error = DomainError;

    fn try_from(model: UserRoleModel) -> Result<Self, Self::Error> {
        Role::from_str(&model.role).map_err(|e| {
            DomainError::DatabaseError(format!("user {} has {e}", model.user_id))
        })
    }
}

/// Values bound when inserting a user
pub struct UserInsert<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub password_hash: &'a str,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.as_str(),
            username: user.username.trim(),
            email: user.email.trim(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            password_hash,
        }
    }
}
