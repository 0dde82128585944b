//! Domain-specific error types for authentication and related operations
//!
//! The HTTP layer decides which of these reach the client verbatim; every
//! authentication failure is collapsed into one generic message there.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are deliberately not told apart
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Password hashing failed")]
    PasswordHashingFailed,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Unexpected signing algorithm")]
    InvalidAlgorithm,

    #[error("Invalid issuer or audience")]
    InvalidClaims,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("No refresh token stored")]
    RefreshTokenMissing,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    /// Another request rotated the refresh token first
    #[error("Refresh token already rotated")]
    RefreshTokenRotated,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (max: {max})")]
    TooLong { field: String, max: usize },

    #[error("Invalid email")]
    InvalidEmail,

    /// Several independent problems found in one payload
    #[error("Validation errors occurred")]
    Multiple { errors: Vec<String> },
}
