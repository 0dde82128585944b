//! User entity representing a registered garden staff account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Access level of an account
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Regular staff member
    #[default]
    User,
    /// Administrator
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Role::User),
            "Admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Keyed hash of the current refresh token together with its expiry
///
/// Hash and expiry only ever exist together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRefreshToken {
    /// Hex-encoded HMAC-SHA256 of the plaintext token
    pub hash: String,

    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

impl StoredRefreshToken {
    pub fn new(hash: String, expires_at: DateTime<Utc>) -> Self {
        Self { hash, expires_at }
    }

    /// Expired when the expiry is at or before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login email, stored normalized
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Access level
    pub role: Role,

    /// Current refresh token, if one has been issued
    #[serde(skip_serializing)]
    pub refresh_token: Option<StoredRefreshToken>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance without a refresh token
    pub fn new(email: &str, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: Self::normalize_email(email),
            password_hash,
            role,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical form used for storage and lookup
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }

    /// Replaces the stored refresh token
    pub fn set_refresh_token(&mut self, token: StoredRefreshToken) {
        self.refresh_token = Some(token);
        self.updated_at = Utc::now();
    }
}
