//! Shared setup for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use bg_api::AppState;
use bg_core::repositories::{MockPlantRepository, MockTaxonomyRepository, MockUserRepository};
use bg_core::services::{
    AuthService, AuthServiceConfig, CatalogService, TokenService, TokenServiceConfig,
};
use bg_shared::CorsConfig;

pub const SIGNING_KEY: &str = "integration-test-signing-key-0123456789";
pub const ISSUER: &str = "botgarden";
pub const AUDIENCE: &str = "botgarden-api";

pub type TestState = AppState<MockUserRepository, MockTaxonomyRepository, MockPlantRepository>;

/// Application state over fresh in-memory repositories
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub taxonomy: Arc<MockTaxonomyRepository>,
    pub plants: Arc<MockPlantRepository>,
}

pub fn context(require_auth: bool) -> TestContext {
    let users = Arc::new(MockUserRepository::new());
    let taxonomy = Arc::new(MockTaxonomyRepository::new());
    let plants = Arc::new(MockPlantRepository::new(taxonomy.as_ref().clone()));

    let token_service = Arc::new(
        TokenService::new(Arc::clone(&users), &TokenServiceConfig::new(SIGNING_KEY)).unwrap(),
    );
    let jwt_codec = token_service.codec();
    let auth_service = Arc::new(
        AuthService::new(
            Arc::clone(&users),
            token_service,
            AuthServiceConfig::default().with_bcrypt_cost(4),
        )
        .unwrap(),
    );
    let catalog_service = Arc::new(CatalogService::new(
        Arc::clone(&taxonomy),
        Arc::clone(&plants),
    ));

    TestContext {
        state: web::Data::new(AppState::new(
            auth_service,
            catalog_service,
            jwt_codec,
            require_auth,
        )),
        users,
        taxonomy,
        plants,
    }
}

pub fn cors() -> CorsConfig {
    CorsConfig::default()
}

pub fn credentials(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "email": email, "password": password })
}
