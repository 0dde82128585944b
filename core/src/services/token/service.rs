//! Main token service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::{StoredRefreshToken, User};
use crate::errors::{DomainError, TokenError};
use crate::repositories::UserRepository;

use super::config::TokenServiceConfig;
use super::hasher::RefreshTokenHasher;
use super::jwt::JwtCodec;

/// Service issuing access tokens and rotating refresh tokens
///
/// The refresh token of a user lives on the user record as a keyed hash;
/// rotation goes through [`UserRepository::rotate_refresh_token`] so that two
/// concurrent refreshes with the same token cannot both succeed.
pub struct TokenService<U: UserRepository> {
    users: Arc<U>,
    codec: Arc<JwtCodec>,
    hasher: RefreshTokenHasher,
    refresh_token_lifetime: Duration,
}

impl<U: UserRepository> TokenService<U> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `users` - User repository holding refresh token hashes
    /// * `config` - Token service configuration
    pub fn new(users: Arc<U>, config: &TokenServiceConfig) -> Result<Self, DomainError> {
        Ok(Self {
            users,
            codec: Arc::new(JwtCodec::new(config)),
            hasher: RefreshTokenHasher::new(&config.refresh_token_secret)?,
            refresh_token_lifetime: config.refresh_token_lifetime(),
        })
    }

    /// Codec shared with the request-verification middleware
    pub fn codec(&self) -> Arc<JwtCodec> {
        Arc::clone(&self.codec)
    }

    /// Issues a fresh token pair and stores the refresh token hash
    ///
    /// Any refresh token previously stored for the user is replaced.
    pub async fn issue_tokens(&self, user: &User) -> Result<TokenPair, DomainError> {
        let access_token = self.codec.issue(&user.email, user.role)?;
        let (refresh_token, stored) = self.new_refresh_token();

        self.users.set_refresh_token(user.id, &stored).await?;

        tracing::debug!(user_id = %user.id, "Issued token pair");
        Ok(self.pair(access_token, refresh_token))
    }

    /// Exchanges an access token (possibly expired) plus its refresh token
    /// for a new pair
    ///
    /// # Errors
    ///
    /// Every failure is a [`DomainError::Token`] or [`DomainError::Unauthorized`];
    /// callers report them all as one authentication failure.
    pub async fn refresh_tokens(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<TokenPair, DomainError> {
        let claims = self.codec.decode_allow_expired(access_token)?;

        let user = self
            .users
            .find_by_email(&claims.name)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Refresh attempted for an unknown account");
                DomainError::Unauthorized
            })?;

        let stored = user
            .refresh_token
            .as_ref()
            .ok_or(TokenError::RefreshTokenMissing)?;

        if !self.hasher.verify(refresh_token, &stored.hash) {
            tracing::warn!(user_id = %user.id, "Refresh token does not match stored hash");
            return Err(TokenError::InvalidRefreshToken.into());
        }

        if stored.is_expired_at(Utc::now()) {
            tracing::debug!(user_id = %user.id, "Stored refresh token expired");
            return Err(TokenError::RefreshTokenExpired.into());
        }

        let access_token = self.codec.issue(&user.email, user.role)?;
        let (new_refresh_token, new_stored) = self.new_refresh_token();

        let rotated = self
            .users
            .rotate_refresh_token(user.id, &stored.hash, &new_stored)
            .await?;
        if !rotated {
            tracing::warn!(user_id = %user.id, "Refresh token was rotated concurrently");
            return Err(TokenError::RefreshTokenRotated.into());
        }

        tracing::info!(user_id = %user.id, "Rotated refresh token");
        Ok(self.pair(access_token, new_refresh_token))
    }

    /// Fully verifies an access token and returns its claims
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.codec.decode(token)
    }

    fn new_refresh_token(&self) -> (String, StoredRefreshToken) {
        let plaintext = self.hasher.generate();
        let stored = StoredRefreshToken::new(
            self.hasher.hash(&plaintext),
            Utc::now() + self.refresh_token_lifetime,
        );
        (plaintext, stored)
    }

    fn pair(&self, access_token: String, refresh_token: String) -> TokenPair {
        TokenPair::new(
            access_token,
            refresh_token,
            self.codec.access_token_expires_in(),
            self.refresh_token_lifetime.num_seconds(),
        )
    }
}
