//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use bg_core::domain::entities::user::{Role, StoredRefreshToken, User};
use bg_core::errors::{AuthError, DomainError};
use bg_core::repositories::UserRepository;

use super::query_failed;

const USER_COLUMNS: &str = "id, email, password_hash, role, refresh_token_hash, \
                            refresh_token_expires_at, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let column = |name: &str, e: sqlx::Error| {
            DomainError::internal(format!("Failed to get {}: {}", name, e))
        };

        let id: String = row.try_get("id").map_err(|e| column("id", e))?;
        let role: String = row.try_get("role").map_err(|e| column("role", e))?;
        let hash: Option<String> = row
            .try_get("refresh_token_hash")
            .map_err(|e| column("refresh_token_hash", e))?;
        let expires_at: Option<DateTime<Utc>> = row
            .try_get("refresh_token_expires_at")
            .map_err(|e| column("refresh_token_expires_at", e))?;

        let refresh_token = match (hash, expires_at) {
            (Some(hash), Some(expires_at)) => Some(StoredRefreshToken::new(hash, expires_at)),
            _ => None,
        };

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid UUID: {}", e)))?,
            email: row.try_get("email").map_err(|e| column("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column("password_hash", e))?,
            role: role.parse::<Role>().map_err(DomainError::internal)?,
            refresh_token,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column("updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find user by email"))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find user by id"))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, role,
                refresh_token_hash, refresh_token_expires_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.refresh_token.as_ref().map(|t| t.hash.clone()))
            .bind(user.refresh_token.as_ref().map(|t| t.expires_at))
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(user_id = %user.id, "Inserted user");
                Ok(user)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(AuthError::UserAlreadyExists.into())
            }
            Err(e) => Err(query_failed("Failed to create user")(e)),
        }
    }

    async fn set_refresh_token(
        &self,
        user_id: Uuid,
        token: &StoredRefreshToken,
    ) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users
            SET refresh_token_hash = ?, refresh_token_expires_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&token.hash)
            .bind(token.expires_at)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to store refresh token"))?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound.into());
        }
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        expected_hash: &str,
        token: &StoredRefreshToken,
    ) -> Result<bool, DomainError> {
        // The hash comparison in WHERE makes the swap atomic
        let query = r#"
            UPDATE users
            SET refresh_token_hash = ?, refresh_token_expires_at = ?, updated_at = ?
            WHERE id = ? AND refresh_token_hash = ?
        "#;

        let result = sqlx::query(query)
            .bind(&token.hash)
            .bind(token.expires_at)
            .bind(Utc::now())
            .bind(user_id.to_string())
            .bind(expected_hash)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to rotate refresh token"))?;

        Ok(result.rows_affected() == 1)
    }
}
