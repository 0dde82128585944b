//! Plant repository trait.

use async_trait::async_trait;

use crate::domain::entities::plant::{NewPlant, Plant, PlantWithTaxonomy};
use crate::errors::DomainError;

/// Repository trait for plant records
#[async_trait]
pub trait PlantRepository: Send + Sync {
    /// Plants of a sector ordered by id, with family and genus names
    async fn list_by_sector(&self, sector_id: i64) -> Result<Vec<PlantWithTaxonomy>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Plant>, DomainError>;

    /// Plants among `ids` that exist; unknown ids are skipped
    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Plant>, DomainError>;

    /// Insert a plant and return it with its generated id
    async fn create(&self, plant: NewPlant) -> Result<Plant, DomainError>;

    /// Write all plants atomically: either every row is updated or none
    async fn update_many(&self, plants: &[Plant]) -> Result<(), DomainError>;

    /// # Returns
    /// * `Ok(true)` - Plant deleted
    /// * `Ok(false)` - No plant with this id
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Delete every existing plant among `ids` and return how many were removed
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError>;

    /// Plants that have both latitude and longitude, ordered by id
    async fn list_with_coordinates(&self) -> Result<Vec<Plant>, DomainError>;
}
