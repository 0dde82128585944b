//! Configuration for the authentication service

use bg_shared::AuthConfig;

/// Longest accepted password, in bytes
///
/// bcrypt ignores everything past its 72nd input byte.
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Whether self-registration is open
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            allow_registration: true,
        }
    }
}

impl AuthServiceConfig {
    /// Cheap hashing for tests
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            bcrypt_cost: config.bcrypt_cost,
            ..Default::default()
        }
    }
}
