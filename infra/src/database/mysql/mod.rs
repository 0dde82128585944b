//! MySQL implementations of the core repository traits

mod plant_repository_impl;
mod taxonomy_repository_impl;
mod user_repository_impl;

pub use plant_repository_impl::MySqlPlantRepository;
pub use taxonomy_repository_impl::MySqlTaxonomyRepository;
pub use user_repository_impl::MySqlUserRepository;

use bg_core::errors::DomainError;

/// Log a query failure and hide its details from callers
pub(crate) fn query_failed(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, "{}", context);
        DomainError::internal(format!("{}: database error", context))
    }
}
