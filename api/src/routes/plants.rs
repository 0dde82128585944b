//! Plant inventory endpoints

use actix_web::{web, HttpResponse};
use bg_shared::ApiResponse;
use serde_json::json;

use crate::dto::{BatchDeleteRequest, SectorQuery};
use crate::handlers::handle_domain_error;
use crate::middleware::auth::OptionalAuth;
use crate::state::AppState;

use bg_core::domain::entities::plant::PlantPatch;
use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};
use bg_core::services::PlantDraft;

fn actor(auth: &OptionalAuth) -> &str {
    auth.0.as_ref().map(|a| a.email.as_str()).unwrap_or("anonymous")
}

/// Handler for GET /api/plants?sector_id=N
///
/// ## Errors
/// - 400 Bad Request: `sector_id` missing or not positive
/// - 404 Not Found: No such sector
pub async fn list_plants<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    query: web::Query<SectorQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    match state.catalog_service.list_plants(query.sector_id).await {
        Ok(plants) => {
            HttpResponse::Ok().json(ApiResponse::success("Plants retrieved successfully.", plants))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/plants/{id}
pub async fn get_plant<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    id: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    match state.catalog_service.get_plant(id.into_inner()).await {
        Ok(plant) => {
            HttpResponse::Ok().json(ApiResponse::success("Plant retrieved successfully.", plant))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/plants
///
/// Coordinates arrive as strings and accept either `.` or `,` as the
/// decimal separator. All problems with the payload are reported at once.
///
/// ## Errors
/// - 400 Bad Request: `details` lists every validation message
pub async fn add_plant<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    auth: OptionalAuth,
    draft: web::Json<PlantDraft>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    match state.catalog_service.add_plant(draft.into_inner()).await {
        Ok(plant) => {
            tracing::info!(id = plant.id, by = actor(&auth), "Plant added");
            HttpResponse::Created().json(ApiResponse::success("Plant successfully added!", plant))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/plants/batch-update
///
/// Body is a list of patches; fields left out or null keep their value.
///
/// ## Errors
/// - 400 Bad Request: Empty list or invalid values
/// - 404 Not Found: Any unknown `plant_id`; nothing is changed
pub async fn batch_update<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    auth: OptionalAuth,
    patches: web::Json<Vec<PlantPatch>>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    match state.catalog_service.batch_update(patches.into_inner()).await {
        Ok(updated) => {
            tracing::info!(updated, by = actor(&auth), "Plants updated");
            HttpResponse::Ok().json(ApiResponse::success(
                "Plants updated successfully.",
                json!({ "updated": updated }),
            ))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for DELETE /api/plants/{id}
pub async fn delete_plant<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    auth: OptionalAuth,
    id: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    let id = id.into_inner();
    match state.catalog_service.delete_plant(id).await {
        Ok(()) => {
            tracing::info!(id, by = actor(&auth), "Plant deleted");
            HttpResponse::Ok().json(ApiResponse::message("Plant deleted successfully."))
        }
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/plants/batch-delete
///
/// Deletes the existing plants among `plant_ids`.
///
/// ## Errors
/// - 400 Bad Request: Empty id list
/// - 404 Not Found: None of the ids exists
pub async fn batch_delete<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    auth: OptionalAuth,
    request: web::Json<BatchDeleteRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    match state
        .catalog_service
        .batch_delete(request.into_inner().plant_ids)
        .await
    {
        Ok(removed) => {
            tracing::info!(removed, by = actor(&auth), "Plants removed");
            HttpResponse::Ok().json(ApiResponse::success(
                "Plants removed successfully.",
                json!({ "removed": removed }),
            ))
        }
        Err(error) => handle_domain_error(error),
    }
}
