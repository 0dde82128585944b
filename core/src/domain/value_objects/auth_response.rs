//! Authentication response value objects for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{Role, User};

/// Token type advertised to clients
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Authentication response containing the token pair
///
/// Returned by register, login and refresh. The refresh token is the only
/// copy of the plaintext the server ever hands out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Opaque refresh token for obtaining a new pair
    pub refresh_token: String,

    /// Always "Bearer"
    pub token_type: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,
}

impl AuthResponse {
    /// Creates an authentication response from a freshly issued token pair
    pub fn from_token_pair(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in: pair.access_expires_in,
        }
    }
}

/// Public view of the authenticated account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role,
        }
    }
}
