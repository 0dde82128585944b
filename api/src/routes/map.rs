use actix_web::{web, HttpResponse};
use bg_shared::ApiResponse;

use crate::handlers::handle_domain_error;
use crate::state::AppState;

use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};

/// Handler for GET /api/map/plants
///
/// Markers for every plant that has both coordinates.
pub async fn plant_markers<U, T, P>(state: web::Data<AppState<U, T, P>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    match state.catalog_service.map_markers().await {
        Ok(markers) => {
            HttpResponse::Ok().json(ApiResponse::success("Markers retrieved successfully.", markers))
        }
        Err(error) => handle_domain_error(error),
    }
}
