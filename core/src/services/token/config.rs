//! Configuration for the token service

use bg_shared::JwtConfig;
use chrono::Duration;
use std::fmt;

use crate::domain::entities::token::{ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
///
/// Built once from [`JwtConfig`] at startup and never mutated afterwards.
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing key
    pub signing_key: String,
    /// Expected and emitted `iss`
    pub issuer: String,
    /// Expected and emitted `aud`
    pub audience: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
    /// Key of the refresh-token HMAC
    pub refresh_token_secret: Vec<u8>,
}

impl TokenServiceConfig {
    /// Configuration with default issuer, audience and lifetimes
    pub fn new(signing_key: impl Into<String>) -> Self {
        let signing_key = signing_key.into();
        Self {
            refresh_token_secret: signing_key.as_bytes().to_vec(),
            signing_key,
            issuer: "botgarden".to_string(),
            audience: "botgarden-api".to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }

    pub fn access_token_lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_expiry_minutes)
    }

    pub fn refresh_token_lifetime(&self) -> Duration {
        Duration::days(self.refresh_token_expiry_days)
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            signing_key: config.key.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
            refresh_token_secret: config.refresh_token_secret_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_token_expiry_minutes", &self.access_token_expiry_minutes)
            .field("refresh_token_expiry_days", &self.refresh_token_expiry_days)
            .finish_non_exhaustive()
    }
}
