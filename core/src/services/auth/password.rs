//! bcrypt password hashing

use crate::errors::{AuthError, DomainError};

/// Hashes and verifies passwords on the blocking thread pool
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Verified against when the account does not exist, so that unknown
    /// emails take as long as wrong passwords
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, DomainError> {
        let dummy_hash = bcrypt::hash("botgarden-dummy-password", cost)
            .map_err(|_| DomainError::from(AuthError::PasswordHashingFailed))?;
        Ok(Self { cost, dummy_hash })
    }

    pub async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| {
                tracing::error!(error = %e, "bcrypt hashing failed");
                DomainError::from(AuthError::PasswordHashingFailed)
            })
    }

    /// `false` for a wrong password and for an unparseable hash alike
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();

        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Verification task failed: {}", e)))?;

        Ok(verified.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }))
    }

    /// Burn one verification against the dummy hash
    pub async fn verify_dummy(&self, password: &str) -> Result<(), DomainError> {
        let dummy = self.dummy_hash.clone();
        self.verify(password, &dummy).await.map(|_| ())
    }
}
