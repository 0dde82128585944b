use actix_web::{web, HttpResponse};

use crate::handlers::handle_domain_error;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};

/// Handler for GET /api/auth/user
///
/// Returns `{email, role}` of the account named by the access token.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 404 Not Found: The account no longer exists
pub async fn current_user<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    match state.auth_service.current_user(&auth.email).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(error),
    }
}
