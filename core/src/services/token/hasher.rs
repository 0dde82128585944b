//! Generation and keyed hashing of refresh tokens

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

use crate::domain::entities::token::REFRESH_TOKEN_BYTES;
use crate::errors::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// Refresh tokens are opaque random values; only their HMAC is stored
#[derive(Clone)]
pub struct RefreshTokenHasher {
    mac: HmacSha256,
}

impl RefreshTokenHasher {
    pub fn new(secret: &[u8]) -> Result<Self, DomainError> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| DomainError::internal(format!("Invalid refresh token secret: {}", e)))?;
        Ok(Self { mac })
    }

    /// 32 bytes from the OS RNG, base64 encoded
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        STANDARD.encode(bytes)
    }

    /// Hex-encoded HMAC-SHA256 of the plaintext token
    pub fn hash(&self, token: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time comparison of a presented token against a stored hash
    pub fn verify(&self, token: &str, stored_hash: &str) -> bool {
        constant_time_eq(self.hash(token).as_bytes(), stored_hash.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_token_has_256_bits() {
        let hasher = RefreshTokenHasher::new(b"secret").unwrap();
        let token = hasher.generate();
        assert_eq!(STANDARD.decode(&token).unwrap().len(), REFRESH_TOKEN_BYTES);
        assert_ne!(token, hasher.generate());
    }

    #[test]
    fn test_hash_is_keyed_and_hex() {
        let a = RefreshTokenHasher::new(b"secret-a").unwrap();
        let b = RefreshTokenHasher::new(b"secret-b").unwrap();

        let hash = a.hash("token");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, b.hash("token"));
        assert_ne!(hash, "token");
    }

    #[test]
    fn test_verify() {
        let hasher = RefreshTokenHasher::new(b"secret").unwrap();
        let stored = hasher.hash("token");
        assert!(hasher.verify("token", &stored));
        assert!(!hasher.verify("other", &stored));
        assert!(!hasher.verify("token", ""));
    }
}
