//! Request bodies and query parameters

pub mod auth_dto;
pub mod catalog_dto;

pub use auth_dto::{CredentialsRequest, RefreshTokenRequest};
pub use catalog_dto::{BatchDeleteRequest, NameRequest, SectorQuery};

use bg_core::errors::{DomainError, ValidationError};
use validator::{Validate, ValidationErrors};

/// Run the `validator` rules of a request body
///
/// Every failing rule becomes one message of a `ValidationError::Multiple`.
pub fn validate_request<T: Validate>(request: &T) -> Result<(), DomainError> {
    request.validate().map_err(into_domain_error)
}

fn into_domain_error(errors: ValidationErrors) -> DomainError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for {}.", field),
            })
        })
        .collect();
    messages.sort();

    ValidationError::Multiple { errors: messages }.into()
}
