use actix_web::{web, HttpResponse};

use crate::dto::{validate_request, RefreshTokenRequest};
use crate::handlers::error_handler::{handle_domain_error, is_refresh_failure};
use crate::state::AppState;

use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};

/// Handler for POST /api/auth/refresh
///
/// Exchanges an access token (expired or not) and its refresh token for a
/// new pair. The presented refresh token stops working once this succeeds.
///
/// # Request Body
///
/// ```json
/// {
///     "token": "eyJ...",
///     "refresh_token": "base64..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Either field missing or empty
/// - 401 Unauthorized: Bad signature, unknown user, wrong, expired or
///   already rotated refresh token
pub async fn refresh_token<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<RefreshTokenRequest>,
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
        .refresh(&request.token, &request.refresh_token)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => {
            if is_refresh_failure(&error) {
                tracing::info!(cause = %error, "Refresh token rejected");
            }
            handle_domain_error(error)
        }
    }
}
