//! Mapping of domain errors to HTTP responses

use actix_web::{
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use bg_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use bg_shared::ErrorResponse;

/// Error code of the single body used for every authentication failure
pub const AUTHENTICATION_FAILED: &str = "authentication_failed";

const AUTHENTICATION_FAILED_MESSAGE: &str = "Invalid credentials or token";

/// Response returned for any rejected credential or token
///
/// The body never reveals which check failed.
pub fn authentication_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        AUTHENTICATION_FAILED,
        AUTHENTICATION_FAILED_MESSAGE,
    ))
}

/// Status code a domain error is reported with
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::Auth(AuthError::UserAlreadyExists) => StatusCode::CONFLICT,
        DomainError::NotFound { .. } | DomainError::Auth(AuthError::UserNotFound) => {
            StatusCode::NOT_FOUND
        }
        e if e.is_authentication_failure() => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into the JSON response sent to the client
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    let status = status_for(&error);

    match status {
        StatusCode::UNAUTHORIZED => {
            tracing::warn!(cause = %error, "Authentication failed");
            authentication_failed()
        }
        StatusCode::INTERNAL_SERVER_ERROR => {
            tracing::error!(error = %error, "Request failed");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
        StatusCode::CONFLICT => HttpResponse::Conflict().json(ErrorResponse::new(
            "conflict",
            error.to_string(),
        )),
        StatusCode::NOT_FOUND => HttpResponse::NotFound().json(ErrorResponse::new(
            "not_found",
            not_found_message(&error),
        )),
        _ => {
            tracing::debug!(error = %error, "Rejected invalid request");
            HttpResponse::BadRequest().json(validation_body(error))
        }
    }
}

fn not_found_message(error: &DomainError) -> String {
    match error {
        DomainError::NotFound { resource } => format!("{} not found.", resource),
        other => other.to_string(),
    }
}

fn validation_body(error: DomainError) -> ErrorResponse {
    match error {
        DomainError::ValidationErr(ValidationError::Multiple { errors }) => {
            ErrorResponse::new("validation_error", "Validation errors occurred.")
                .with_details(errors)
        }
        other => ErrorResponse::new("validation_error", other.to_string()),
    }
}

fn bad_request<E>(cause: E, message: String) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    tracing::debug!(error = %cause, "Malformed request");
    let response = HttpResponse::BadRequest().json(ErrorResponse::new("invalid_request", message));
    InternalError::from_response(cause, response).into()
}

/// Answer malformed JSON bodies with a JSON error instead of plain text
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid request body: {}", err);
    bad_request(err, message)
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid query string: {}", err);
    bad_request(err, message)
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let message = format!("Invalid path parameter: {}", err);
    bad_request(err, message)
}

/// Token errors that only the refresh flow distinguishes in logs
pub fn is_refresh_failure(error: &DomainError) -> bool {
    matches!(
        error,
        DomainError::Token(
            TokenError::RefreshTokenMissing
                | TokenError::InvalidRefreshToken
                | TokenError::RefreshTokenExpired
                | TokenError::RefreshTokenRotated
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&ValidationError::InvalidEmail.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AuthError::UserAlreadyExists.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&TokenError::RefreshTokenRotated.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_for(&DomainError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(&AuthError::UserNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_for(&DomainError::not_found("Plant")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&TokenError::TokenGenerationFailed.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&DomainError::internal("pool closed")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_authentication_failures_share_one_body() {
        let expired = body_json(handle_domain_error(TokenError::RefreshTokenExpired.into())).await;
        let bad_password = body_json(handle_domain_error(AuthError::InvalidCredentials.into())).await;

        assert_eq!(expired["error"], AUTHENTICATION_FAILED);
        assert_eq!(expired["message"], bad_password["message"]);
        assert_eq!(expired["error"], bad_password["error"]);
    }

    #[actix_web::test]
    async fn test_multiple_validation_errors_listed() {
        let error = ValidationError::Multiple {
            errors: vec![
                "Invalid latitude value: 'abc'.".to_string(),
                "Sector 9 does not exist.".to_string(),
            ],
        };
        let response = handle_domain_error(error.into());
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"].as_array().map(Vec::len), Some(2));
    }

    #[actix_web::test]
    async fn test_internal_error_hides_cause() {
        let body = body_json(handle_domain_error(DomainError::internal("connection refused"))).await;
        assert_eq!(body["error"], "internal_error");
        assert!(!body["message"].as_str().unwrap_or_default().contains("connection refused"));
    }

    #[test]
    fn test_refresh_failure_classification() {
        assert!(is_refresh_failure(&TokenError::RefreshTokenRotated.into()));
        assert!(!is_refresh_failure(&TokenError::InvalidSignature.into()));
    }
}
