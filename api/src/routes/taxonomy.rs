//! Reference tables: plant families, genera and sectors
//!
//! Each table has the same three endpoints: list ordered by id, fetch one
//! by id and create from `{name}`.

use actix_web::{web, HttpResponse};
use bg_shared::ApiResponse;

use crate::dto::NameRequest;
use crate::handlers::handle_domain_error;
use crate::state::AppState;

use bg_core::errors::DomainResult;
use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};

fn ok<D: serde::Serialize>(result: DomainResult<D>, message: &str) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::success(message, data)),
        Err(error) => handle_domain_error(error),
    }
}

fn created<D: serde::Serialize>(result: DomainResult<D>, message: &str) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Created().json(ApiResponse::success(message, data)),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for GET /api/families
pub async fn list_families<U, T, P>(state: web::Data<AppState<U, T, P>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    ok(
        state.catalog_service.list_families().await,
        "Families retrieved successfully.",
    )
}

/// Handler for GET /api/families/{id}
pub async fn get_family<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    id: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    ok(
        state.catalog_service.get_family(id.into_inner()).await,
        "Family retrieved successfully.",
    )
}

/// Handler for POST /api/families
pub async fn create_family<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<NameRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    created(
        state.catalog_service.create_family(&request.name).await,
        "Family created successfully.",
    )
}

/// Handler for GET /api/genera
pub async fn list_genera<U, T, P>(state: web::Data<AppState<U, T, P>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    ok(
        state.catalog_service.list_genera().await,
        "Genera retrieved successfully.",
    )
}

/// Handler for GET /api/genera/{id}
pub async fn get_genus<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    id: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    ok(
        state.catalog_service.get_genus(id.into_inner()).await,
        "Genus retrieved successfully.",
    )
}

/// Handler for POST /api/genera
pub async fn create_genus<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<NameRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    created(
        state.catalog_service.create_genus(&request.name).await,
        "Genus created successfully.",
    )
}

/// Handler for GET /api/sectors
pub async fn list_sectors<U, T, P>(state: web::Data<AppState<U, T, P>>) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    ok(
        state.catalog_service.list_sectors().await,
        "Sectors retrieved successfully.",
    )
}

/// Handler for GET /api/sectors/{id}
pub async fn get_sector<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    id: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    ok(
        state.catalog_service.get_sector(id.into_inner()).await,
        "Sector retrieved successfully.",
    )
}

/// Handler for POST /api/sectors
pub async fn create_sector<U, T, P>(
    state: web::Data<AppState<U, T, P>>,
    request: web::Json<NameRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    created(
        state.catalog_service.create_sector(&request.name).await,
        "Sector created successfully.",
    )
}
