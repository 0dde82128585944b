//! Application factory
//!
//! Builds the Actix-web application from shared state. The same factory
//! serves the binary and the integration tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, HttpResponse,
};
use bg_shared::{CorsConfig, Environment, ErrorResponse};

use crate::handlers::error_handler::{json_error_handler, path_error_handler, query_error_handler};
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{auth, map, plants, taxonomy};
use crate::state::AppState;

use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};

/// Create and configure the application with all dependencies
pub fn create_app<U, T, P>(
    app_state: web::Data<AppState<U, T, P>>,
    cors_config: &CorsConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TaxonomyRepository + 'static,
    P: PlantRepository + 'static,
{
    let codec = app_state.jwt_codec.clone();
    let catalog_auth = JwtAuth::new(codec.clone(), app_state.require_auth);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        // Registered last, runs first: CORS answers preflights itself
        .wrap(Logger::default())
        .wrap(create_cors(cors_config, environment))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(auth::register::<U, T, P>))
                .route("/login", web::post().to(auth::login::<U, T, P>))
                .route("/refresh", web::post().to(auth::refresh_token::<U, T, P>))
                .service(
                    web::resource("/user")
                        .wrap(JwtAuth::required(codec))
                        .route(web::get().to(auth::current_user::<U, T, P>)),
                ),
        )
        .service(
            web::scope("/api")
                .wrap(catalog_auth)
                .service(
                    web::scope("/families")
                        .route("", web::get().to(taxonomy::list_families::<U, T, P>))
                        .route("", web::post().to(taxonomy::create_family::<U, T, P>))
                        .route("/{id}", web::get().to(taxonomy::get_family::<U, T, P>)),
                )
                .service(
                    web::scope("/genera")
                        .route("", web::get().to(taxonomy::list_genera::<U, T, P>))
                        .route("", web::post().to(taxonomy::create_genus::<U, T, P>))
                        .route("/{id}", web::get().to(taxonomy::get_genus::<U, T, P>)),
                )
                .service(
                    web::scope("/sectors")
                        .route("", web::get().to(taxonomy::list_sectors::<U, T, P>))
                        .route("", web::post().to(taxonomy::create_sector::<U, T, P>))
                        .route("/{id}", web::get().to(taxonomy::get_sector::<U, T, P>)),
                )
                .service(
                    web::scope("/plants")
                        .route("", web::get().to(plants::list_plants::<U, T, P>))
                        .route("", web::post().to(plants::add_plant::<U, T, P>))
                        .route(
                            "/batch-update",
                            web::post().to(plants::batch_update::<U, T, P>),
                        )
                        .route(
                            "/batch-delete",
                            web::post().to(plants::batch_delete::<U, T, P>),
                        )
                        .route("/{id}", web::get().to(plants::get_plant::<U, T, P>))
                        .route("/{id}", web::delete().to(plants::delete_plant::<U, T, P>)),
                )
                .route("/map/plants", web::get().to(map::plant_markers::<U, T, P>)),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "botgarden-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
