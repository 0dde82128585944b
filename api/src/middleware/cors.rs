//! CORS middleware configuration for cross-origin requests.
//!
//! The garden web client runs on its own origin. Development builds accept
//! any origin; other environments only accept the configured list.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use bg_shared::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given environment.
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    if environment.is_development() {
        create_development_cors(config)
    } else {
        create_restricted_cors(config)
    }
}

fn base_cors(config: &CorsConfig) -> Cors {
    Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age)
}

/// Permissive configuration for local work against any dev server port.
fn create_development_cors(config: &CorsConfig) -> Cors {
    tracing::info!("Configuring CORS for development environment");

    base_cors(config).allow_any_origin().supports_credentials()
}

/// Only the configured origins may make credentialed requests.
fn create_restricted_cors(config: &CorsConfig) -> Cors {
    tracing::info!("Configuring CORS for restricted origins");

    let mut cors = base_cors(config).supports_credentials();
    for origin in config
        .allowed_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
    {
        tracing::info!(origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}
