//! In-memory implementation of TaxonomyRepository

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::taxonomy::{Genus, PlantFamily, Sector};
use crate::errors::DomainError;

use super::trait_::TaxonomyRepository;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i64, String>,
    next_id: i64,
}

impl Table {
    fn insert(&mut self, name: &str) -> i64 {
        self.next_id += 1;
        self.rows.insert(self.next_id, name.to_string());
        self.next_id
    }
}

/// Mock taxonomy repository; ids start at 1 per table
#[derive(Clone, Default)]
pub struct MockTaxonomyRepository {
    families: Arc<RwLock<Table>>,
    genera: Arc<RwLock<Table>>,
    sectors: Arc<RwLock<Table>>,
}

impl MockTaxonomyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of a family, if it exists
    pub async fn family_name(&self, id: i64) -> Option<String> {
        self.families.read().await.rows.get(&id).cloned()
    }

    /// Name of a genus, if it exists
    pub async fn genus_name(&self, id: i64) -> Option<String> {
        self.genera.read().await.rows.get(&id).cloned()
    }
}

#[async_trait]
impl TaxonomyRepository for MockTaxonomyRepository {
    async fn list_families(&self) -> Result<Vec<PlantFamily>, DomainError> {
        let table = self.families.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, name)| PlantFamily { id: *id, name: name.clone() })
            .collect())
    }

    async fn find_family(&self, id: i64) -> Result<Option<PlantFamily>, DomainError> {
        Ok(self
            .family_name(id)
            .await
            .map(|name| PlantFamily { id, name }))
    }

    async fn create_family(&self, name: &str) -> Result<PlantFamily, DomainError> {
        let id = self.families.write().await.insert(name);
        Ok(PlantFamily { id, name: name.to_string() })
    }

    async fn list_genera(&self) -> Result<Vec<Genus>, DomainError> {
        let table = self.genera.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, name)| Genus { id: *id, name: name.clone() })
            .collect())
    }

    async fn find_genus(&self, id: i64) -> Result<Option<Genus>, DomainError> {
        Ok(self.genus_name(id).await.map(|name| Genus { id, name }))
    }

    async fn create_genus(&self, name: &str) -> Result<Genus, DomainError> {
        let id = self.genera.write().await.insert(name);
        Ok(Genus { id, name: name.to_string() })
    }

    async fn list_sectors(&self) -> Result<Vec<Sector>, DomainError> {
        let table = self.sectors.read().await;
        Ok(table
            .rows
            .iter()
            .map(|(id, name)| Sector { id: *id, name: name.clone() })
            .collect())
    }

    async fn find_sector(&self, id: i64) -> Result<Option<Sector>, DomainError> {
        let table = self.sectors.read().await;
        Ok(table
            .rows
            .get(&id)
            .map(|name| Sector { id, name: name.clone() }))
    }

    async fn create_sector(&self, name: &str) -> Result<Sector, DomainError> {
        let id = self.sectors.write().await.insert(name);
        Ok(Sector { id, name: name.to_string() })
    }
}
