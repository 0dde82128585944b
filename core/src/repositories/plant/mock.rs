//! In-memory implementation of PlantRepository

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::plant::{NewPlant, Plant, PlantWithTaxonomy};
use crate::errors::DomainError;
use crate::repositories::taxonomy::MockTaxonomyRepository;

use super::trait_::PlantRepository;

#[derive(Default)]
struct Store {
    plants: BTreeMap<i64, Plant>,
    next_id: i64,
}

/// Mock plant repository
///
/// Family and genus names are resolved against the shared taxonomy mock.
#[derive(Clone)]
pub struct MockPlantRepository {
    store: Arc<RwLock<Store>>,
    taxonomy: MockTaxonomyRepository,
}

impl MockPlantRepository {
    pub fn new(taxonomy: MockTaxonomyRepository) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            taxonomy,
        }
    }
}

#[async_trait]
impl PlantRepository for MockPlantRepository {
    async fn list_by_sector(&self, sector_id: i64) -> Result<Vec<PlantWithTaxonomy>, DomainError> {
        let plants: Vec<Plant> = {
            let store = self.store.read().await;
            store
                .plants
                .values()
                .filter(|p| p.details.sector_id == sector_id)
                .cloned()
                .collect()
        };

        let mut result = Vec::with_capacity(plants.len());
        for plant in plants {
            let family_name = match plant.details.family_id {
                Some(id) => self.taxonomy.family_name(id).await,
                None => None,
            };
            let genus_name = match plant.details.genus_id {
                Some(id) => self.taxonomy.genus_name(id).await,
                None => None,
            };
            result.push(PlantWithTaxonomy {
                plant,
                family_name,
                genus_name,
            });
        }
        Ok(result)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Plant>, DomainError> {
        Ok(self.store.read().await.plants.get(&id).cloned())
    }

    async fn find_many(&self, ids: &[i64]) -> Result<Vec<Plant>, DomainError> {
        let store = self.store.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.plants.get(id).cloned())
            .collect())
    }

    async fn create(&self, plant: NewPlant) -> Result<Plant, DomainError> {
        let mut store = self.store.write().await;
        store.next_id += 1;
        let plant = Plant::new(store.next_id, plant);
        store.plants.insert(plant.id, plant.clone());
        Ok(plant)
    }

    async fn update_many(&self, plants: &[Plant]) -> Result<(), DomainError> {
        let mut store = self.store.write().await;

        if let Some(missing) = plants.iter().find(|p| !store.plants.contains_key(&p.id)) {
            return Err(DomainError::not_found(format!("Plant {}", missing.id)));
        }

        for plant in plants {
            store.plants.insert(plant.id, plant.clone());
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.store.write().await.plants.remove(&id).is_some())
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError> {
        let mut store = self.store.write().await;
        let removed = ids
            .iter()
            .filter(|id| store.plants.remove(*id).is_some())
            .count();
        Ok(removed as u64)
    }

    async fn list_with_coordinates(&self) -> Result<Vec<Plant>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .plants
            .values()
            .filter(|p| p.coordinates().is_some())
            .cloned()
            .collect())
    }
}
