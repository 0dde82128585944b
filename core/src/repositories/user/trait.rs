//! User repository trait defining the interface for account persistence.
//!
//! The trait is async-first; implementations live in the infrastructure
//! crate (MySQL) and in [`super::mock`] (in-memory).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::{StoredRefreshToken, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Auth(AuthError::UserAlreadyExists))` - Email taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Unconditionally replace the stored refresh token of a user
    ///
    /// Used when a session starts (register, login).
    async fn set_refresh_token(
        &self,
        user_id: Uuid,
        token: &StoredRefreshToken,
    ) -> Result<(), DomainError>;

    /// Replace the stored refresh token only if its hash still equals
    /// `expected_hash`
    ///
    /// # Returns
    /// * `Ok(true)` - Swap performed
    /// * `Ok(false)` - Stored hash changed in the meantime, nothing written
    async fn rotate_refresh_token(
        &self,
        user_id: Uuid,
        expected_hash: &str,
        token: &StoredRefreshToken,
    ) -> Result<bool, DomainError>;
}
