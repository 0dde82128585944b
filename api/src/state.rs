//! Shared application state handed to every handler

use std::sync::Arc;

use bg_core::repositories::{PlantRepository, TaxonomyRepository, UserRepository};
use bg_core::services::{AuthService, CatalogService, JwtCodec};

/// Services shared by all workers
///
/// Generic over the repositories so the same route table serves MySQL in
/// production and the in-memory repositories in tests.
pub struct AppState<U, T, P>
where
    U: UserRepository,
    T: TaxonomyRepository,
    P: PlantRepository,
{
    pub auth_service: Arc<AuthService<U>>,
    pub catalog_service: Arc<CatalogService<T, P>>,
    /// Verifies access tokens on protected routes
    pub jwt_codec: Arc<JwtCodec>,
    /// Reject anonymous requests to catalog routes
    pub require_auth: bool,
}

impl<U, T, P> AppState<U, T, P>
where
    U: UserRepository,
    T: TaxonomyRepository,
    P: PlantRepository,
{
    pub fn new(
        auth_service: Arc<AuthService<U>>,
        catalog_service: Arc<CatalogService<T, P>>,
        jwt_codec: Arc<JwtCodec>,
        require_auth: bool,
    ) -> Self {
        Self {
            auth_service,
            catalog_service,
            jwt_codec,
            require_auth,
        }
    }
}
