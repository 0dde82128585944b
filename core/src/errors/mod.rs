//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Shorthand for a missing resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for an internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Whether this error must be reported as an authentication failure
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            DomainError::Unauthorized => true,
            DomainError::Auth(AuthError::InvalidCredentials) => true,
            DomainError::Token(TokenError::TokenGenerationFailed) => false,
            DomainError::Token(_) => true,
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failure_classification() {
        assert!(DomainError::Unauthorized.is_authentication_failure());
        assert!(DomainError::from(AuthError::InvalidCredentials).is_authentication_failure());
        assert!(DomainError::from(TokenError::RefreshTokenExpired).is_authentication_failure());
        assert!(DomainError::from(TokenError::InvalidSignature).is_authentication_failure());
        assert!(!DomainError::from(TokenError::TokenGenerationFailed).is_authentication_failure());
        assert!(!DomainError::from(AuthError::UserNotFound).is_authentication_failure());
        assert!(!DomainError::not_found("Plant").is_authentication_failure());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DomainError::not_found("Sector").to_string(),
            "Resource not found: Sector"
        );
        assert_eq!(
            DomainError::from(ValidationError::RequiredField { field: "email".to_string() })
                .to_string(),
            "Required field: email"
        );
    }
}
