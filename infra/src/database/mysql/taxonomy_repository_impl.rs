//! MySQL implementation of the TaxonomyRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use bg_core::domain::entities::taxonomy::{Genus, PlantFamily, Sector};
use bg_core::errors::DomainError;
use bg_core::repositories::TaxonomyRepository;

use super::query_failed;

/// MySQL implementation of TaxonomyRepository
///
/// Families, genera and sectors share the `(id, name)` shape; the table
/// name is always one of the constants below, never user input.
pub struct MySqlTaxonomyRepository {
    pool: MySqlPool,
}

const FAMILIES: &str = "plant_families";
const GENERA: &str = "genera";
const SECTORS: &str = "sectors";

impl MySqlTaxonomyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn list(&self, table: &'static str) -> Result<Vec<(i64, String)>, DomainError> {
        let query = format!("SELECT id, name FROM {} ORDER BY id", table);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("Failed to list taxonomy rows"))?;

        rows.iter().map(Self::row_to_pair).collect()
    }

    async fn find(&self, table: &'static str, id: i64) -> Result<Option<String>, DomainError> {
        let query = format!("SELECT id, name FROM {} WHERE id = ?", table);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed("Failed to find taxonomy row"))?;

        Ok(row
            .as_ref()
            .map(Self::row_to_pair)
            .transpose()?
            .map(|(_, name)| name))
    }

    async fn insert(&self, table: &'static str, name: &str) -> Result<i64, DomainError> {
        let query = format!("INSERT INTO {} (name) VALUES (?)", table);

        let result = sqlx::query(&query)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(query_failed("Failed to insert taxonomy row"))?;

        Ok(result.last_insert_id() as i64)
    }

    fn row_to_pair(row: &sqlx::mysql::MySqlRow) -> Result<(i64, String), DomainError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let name: String = row
            .try_get("name")
            .map_err(|e| DomainError::internal(format!("Failed to get name: {}", e)))?;
        Ok((id, name))
    }
}

#[async_trait]
impl TaxonomyRepository for MySqlTaxonomyRepository {
    async fn list_families(&self) -> Result<Vec<PlantFamily>, DomainError> {
        Ok(self
            .list(FAMILIES)
            .await?
            .into_iter()
            .map(|(id, name)| PlantFamily { id, name })
            .collect())
    }

    async fn find_family(&self, id: i64) -> Result<Option<PlantFamily>, DomainError> {
        Ok(self
            .find(FAMILIES, id)
            .await?
            .map(|name| PlantFamily { id, name }))
    }

    async fn create_family(&self, name: &str) -> Result<PlantFamily, DomainError> {
        let id = self.insert(FAMILIES, name).await?;
        Ok(PlantFamily { id, name: name.to_string() })
    }

    async fn list_genera(&self) -> Result<Vec<Genus>, DomainError> {
        Ok(self
            .list(GENERA)
            .await?
            .into_iter()
            .map(|(id, name)| Genus { id, name })
            .collect())
    }

    async fn find_genus(&self, id: i64) -> Result<Option<Genus>, DomainError> {
        Ok(self.find(GENERA, id).await?.map(|name| Genus { id, name }))
    }

    async fn create_genus(&self, name: &str) -> Result<Genus, DomainError> {
        let id = self.insert(GENERA, name).await?;
        Ok(Genus { id, name: name.to_string() })
    }

    async fn list_sectors(&self) -> Result<Vec<Sector>, DomainError> {
        Ok(self
            .list(SECTORS)
            .await?
            .into_iter()
            .map(|(id, name)| Sector { id, name })
            .collect())
    }

    async fn find_sector(&self, id: i64) -> Result<Option<Sector>, DomainError> {
        Ok(self.find(SECTORS, id).await?.map(|name| Sector { id, name }))
    }

    async fn create_sector(&self, name: &str) -> Result<Sector, DomainError> {
        let id = self.insert(SECTORS, name).await?;
        Ok(Sector { id, name: name.to_string() })
    }
}
