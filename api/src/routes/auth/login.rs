use actix_web::{web, HttpResponse};

use crate::dto::{validate_request, CredentialsRequest};
use crate::handlers::handle_domain_error;
use crate::state::AppState;

use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};

/// Handler for POST /api/auth/login
///
/// Verifies the password and starts a new session. Any refresh token
/// issued to the account before is replaced.
///
/// ## Errors
/// - 400 Bad Request: Missing email or password
/// - 401 Unauthorized: Unknown email or wrong password
pub async fn login<U, T, P>(
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
        .login(&request.email, &request.password)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(error),
    }
}
