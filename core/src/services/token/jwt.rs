//! HS256 encoding and verification of access tokens

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Signs and verifies access tokens with the configured symmetric key
///
/// Only HS256 is accepted on decode; a token whose header names any other
/// algorithm fails with [`TokenError::InvalidAlgorithm`].
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expired_validation: Validation,
    issuer: String,
    audience: String,
    access_token_lifetime: chrono::Duration,
}

impl JwtCodec {
    pub fn new(config: &TokenServiceConfig) -> Self {
        let key = config.signing_key.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = 0;

        // Same checks minus lifetime, for the refresh flow
        let mut expired_validation = validation.clone();
        expired_validation.validate_exp = false;

        Self {
            encoding_key: EncodingKey::from_secret(key),
            decoding_key: DecodingKey::from_secret(key),
            validation,
            expired_validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_lifetime: config.access_token_lifetime(),
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_expires_in(&self) -> i64 {
        self.access_token_lifetime.num_seconds()
    }

    /// Mint an access token for an account
    pub fn issue(&self, email: &str, role: Role) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            email,
            role,
            &self.issuer,
            &self.audience,
            self.access_token_lifetime,
        );
        self.encode(&claims)
    }

    /// Sign arbitrary claims
    pub fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign access token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Full verification: signature, algorithm, issuer, audience and expiry
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_with(token, &self.validation)
    }

    /// Verification that ignores `exp`, used when refreshing
    pub fn decode_allow_expired(&self, token: &str) -> Result<Claims, DomainError> {
        self.decode_with(token, &self.expired_validation)
    }

    fn decode_with(&self, token: &str, validation: &Validation) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, validation)
            .map_err(|e| DomainError::Token(map_decode_error(e.kind())))?;

        if data.claims.name.trim().is_empty() {
            return Err(TokenError::MissingClaim {
                claim: "name".to_string(),
            }
            .into());
        }

        Ok(data.claims)
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::InvalidAlgorithm
        }
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => TokenError::InvalidClaims,
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
            claim: claim.clone(),
        },
        _ => TokenError::InvalidTokenFormat,
    }
}
