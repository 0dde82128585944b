//! In-memory implementation of UserRepository for tests and local runs

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{StoredRefreshToken, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository backed by a map
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Overwrite the stored refresh token expiry, for expiry scenarios
    pub async fn force_refresh_expiry(&self, user_id: Uuid, expires_at: chrono::DateTime<Utc>) {
        let mut users = self.users.write().await;
        if let Some(token) = users.get_mut(&user_id).and_then(|u| u.refresh_token.as_mut()) {
            token.expires_at = expires_at;
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::UserAlreadyExists.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn set_refresh_token(
        &self,
        user_id: Uuid,
        token: &StoredRefreshToken,
    ) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| DomainError::from(AuthError::UserNotFound))?;
        user.set_refresh_token(token.clone());
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        expected_hash: &str,
        token: &StoredRefreshToken,
    ) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(false);
        };

        match &user.refresh_token {
            Some(current) if current.hash == expected_hash => {
                user.set_refresh_token(token.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
