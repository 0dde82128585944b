//! # Infrastructure Layer
//!
//! Concrete implementations of the repository traits declared in `bg_core`,
//! backed by MySQL through SQLx.
//!
//! - **Database**: connection pool, health check and embedded migrations
//! - **Repositories**: users, taxonomy tables and plants

use bg_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{
    DatabasePool, MySqlPlantRepository, MySqlTaxonomyRepository, MySqlUserRepository,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::internal(err.to_string())
    }
}
