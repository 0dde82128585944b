//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ConfigError, MIN_JWT_KEY_BYTES};

/// JWT signing configuration
///
/// The key is shared by token issuance and verification. `Debug` output
/// never includes the key or the refresh-token secret.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// Symmetric key for HMAC-SHA256 signing
    pub key: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Access token lifetime in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expiry_days: i64,

    /// Secret for hashing refresh tokens (falls back to `key`)
    pub refresh_token_secret: Option<String>,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            issuer: String::from("botgarden"),
            audience: String::from("botgarden-api"),
            access_token_expiry_minutes: 60,
            refresh_token_expiry_days: 7,
            refresh_token_secret: None,
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"[redacted]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_expiry_minutes", &self.access_token_expiry_minutes)
            .field("refresh_token_expiry_days", &self.refresh_token_expiry_days)
            .field(
                "refresh_token_secret",
                &self.refresh_token_secret.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with a signing key
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Set issuer and audience
    pub fn with_issuer_audience(
        mut self,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        self.issuer = issuer.into();
        self.audience = audience.into();
        self
    }

    /// Use a dedicated secret for refresh-token hashing
    pub fn with_refresh_token_secret(mut self, secret: impl Into<String>) -> Self {
        self.refresh_token_secret = Some(secret.into());
        self
    }

    /// Access token lifetime in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.access_token_expiry_minutes * 60
    }

    /// Bytes of the secret used for refresh-token hashing
    pub fn refresh_token_secret_bytes(&self) -> &[u8] {
        self.refresh_token_secret
            .as_deref()
            .unwrap_or(&self.key)
            .as_bytes()
    }

    /// Check key strength, claims, and lifetimes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.len() < MIN_JWT_KEY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "jwt.key must be at least {} bytes",
                MIN_JWT_KEY_BYTES
            )));
        }
        if self.issuer.is_empty() || self.audience.is_empty() {
            return Err(ConfigError::Invalid(
                "jwt.issuer and jwt.audience must be set".to_string(),
            ));
        }
        if self.access_token_expiry_minutes <= 0 || self.refresh_token_expiry_days <= 0 {
            return Err(ConfigError::Invalid(
                "token lifetimes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Account created at startup when no user with its email exists
#[derive(Clone, Deserialize, Serialize)]
pub struct DefaultAdminConfig {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for DefaultAdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultAdminConfig")
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Account and access-control configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Require a valid access token on catalog routes
    pub require_auth: bool,

    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,

    /// Optional administrator seeded at startup
    pub default_admin: Option<DefaultAdminConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            bcrypt_cost: 12,
            default_admin: None,
        }
    }
}
