//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tweet_core::entities::{Role, User};
use tweet_core::traits::{RepoResult, UserRepository};
use tweet_core::value_objects::UserId;

use crate::mappers::UserInsert;
use crate::models::{UserModel, UserRoleModel};

use super::error::{map_db_error, map_user_conflict, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, first_name, last_name, password_hash, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, username, email, first_name, last_name, password_hash, created_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            ",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))
            ",
        )
        .bind(email.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(username) = LOWER($1))
            ",
        )
        .bind(username.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, user, password_hash), fields(user_id = %user.id))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let insert = UserInsert::new(user, password_hash);

        sqlx::query(
            r"
            INSERT INTO users (id, username, email, first_name, last_name, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(insert.id)
        .bind(insert.username)
        .bind(insert.email)
        .bind(insert.first_name)
        .bind(insert.last_name)
        .bind(insert.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_user_conflict)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &UserId) -> RepoResult<()> {
        // tweets -> comments cascade, authored comments elsewhere are detached
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: &UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn roles(&self, id: &UserId) -> RepoResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, UserRoleModel>(
            r"
            SELECT user_id, role FROM user_roles
            WHERE user_id = $1
            ORDER BY role
            ",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Role::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn add_role(&self, id: &UserId, role: Role) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            INSERT INTO user_roles (user_id, role)
            SELECT id, $2 FROM users WHERE id = $1
            ON CONFLICT (user_id, role) DO NOTHING
            ",
        )
        .bind(id.as_str())
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 && self.find_by_id(id).await?.is_none() {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn any_with_role(&self, role: Role) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM user_roles WHERE role = $1)")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
