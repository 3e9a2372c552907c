// Database repository for accounts

use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::{error::AuthError, models::User};

/// Persistence operations the account service needs from a user store
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, AuthError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError>;

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError>;

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError>;
}

/// User repository for account persistence
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new account
    ///
    /// A unique-constraint violation maps to the taken-username or
    /// taken-email error depending on which constraint fired, so a racing
    /// duplicate registration still reports the right conflict.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, is_admin) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, username, email, password_hash, is_admin, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(is_admin)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    let constraint = db_err.constraint().unwrap_or_default();
                    return if constraint.contains("email") {
                        AuthError::EmailTaken
                    } else {
                        AuthError::UsernameTaken
                    };
                }
            }
            AuthError::Database(e.to_string())
        })?;

        Ok(user)
    }

    /// Find an account by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, is_admin, created_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))
    }

    /// Check if a username is already registered
    pub async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(exists.0)
    }

    /// Check if an email is already registered
    ///
    /// Matches exactly, with the same collation as the unique index, so the
    /// pre-check and the constraint fallback agree on what counts as taken.
    pub async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(exists.0)
    }

    /// Check whether any account exists at all (used by the startup seed)
    pub async fn any_user_exists(&self) -> Result<bool, AuthError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users)")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(exists.0)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, AuthError> {
        UserRepository::create_user(self, username, email, password_hash, is_admin).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        UserRepository::find_by_username(self, username).await
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        UserRepository::username_exists(self, username).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        UserRepository::email_exists(self, email).await
    }
}
