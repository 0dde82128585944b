//! Repository trait for the family, genus and sector reference tables.

use async_trait::async_trait;

use crate::domain::entities::taxonomy::{Genus, PlantFamily, Sector};
use crate::errors::DomainError;

/// Persistence of name-only reference data
///
/// Lists are ordered by id. `create_*` receives an already validated name
/// and returns the row with its generated id.
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    async fn list_families(&self) -> Result<Vec<PlantFamily>, DomainError>;

    async fn find_family(&self, id: i64) -> Result<Option<PlantFamily>, DomainError>;

    async fn create_family(&self, name: &str) -> Result<PlantFamily, DomainError>;

    async fn list_genera(&self) -> Result<Vec<Genus>, DomainError>;

    async fn find_genus(&self, id: i64) -> Result<Option<Genus>, DomainError>;

    async fn create_genus(&self, name: &str) -> Result<Genus, DomainError>;

    async fn list_sectors(&self) -> Result<Vec<Sector>, DomainError>;

    async fn find_sector(&self, id: i64) -> Result<Option<Sector>, DomainError>;

    async fn create_sector(&self, name: &str) -> Result<Sector, DomainError>;
}
