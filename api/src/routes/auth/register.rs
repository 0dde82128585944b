use actix_web::{web, HttpResponse};

use crate::dto::{validate_request, CredentialsRequest};
use crate::handlers::handle_domain_error;
use crate::state::AppState;

use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};

/// Handler for POST /api/auth/register
///
/// Creates a `User` account and returns its first token pair.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "curator@garden.org",
///     "password": "string"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "base64...",
///     "token_type": "Bearer",
///     "expires_in": 3600
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing fields or malformed email
/// - 409 Conflict: Email already registered
pub async fn register<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<CredentialsRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    if let Err(error) = validate_request(&request.0) {
        return handle_domain_error(error);
    }

    match state
        .auth_service
        .register(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(error),
    }
}
