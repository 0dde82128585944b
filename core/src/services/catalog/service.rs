//! Catalog service: reference tables, plants and map markers

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::entities::plant::{
    Plant, PlantMarker, PlantPatch, PlantWithTaxonomy, BIOMETRIC_SECTOR_ID,
};
use crate::domain::entities::taxonomy::{Genus, PlantFamily, Sector, TaxonKind};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{PlantRepository, TaxonomyRepository};

use super::draft::PlantDraft;

/// Service for the garden inventory
pub struct CatalogService<T: TaxonomyRepository, P: PlantRepository> {
    taxonomy: Arc<T>,
    plants: Arc<P>,
}

impl<T: TaxonomyRepository, P: PlantRepository> CatalogService<T, P> {
    pub fn new(taxonomy: Arc<T>, plants: Arc<P>) -> Self {
        Self { taxonomy, plants }
    }

    pub async fn list_families(&self) -> DomainResult<Vec<PlantFamily>> {
        self.taxonomy.list_families().await
    }

    pub async fn get_family(&self, id: i64) -> DomainResult<PlantFamily> {
        self.taxonomy
            .find_family(id)
            .await?
            .ok_or_else(|| DomainError::not_found(TaxonKind::Family.resource()))
    }

    pub async fn create_family(&self, name: &str) -> DomainResult<PlantFamily> {
        let name = TaxonKind::Family.validate_name(name)?;
        let family = self.taxonomy.create_family(&name).await?;
        tracing::info!(id = family.id, name = %family.name, "Created plant family");
        Ok(family)
    }

    pub async fn list_genera(&self) -> DomainResult<Vec<Genus>> {
        self.taxonomy.list_genera().await
    }

    pub async fn get_genus(&self, id: i64) -> DomainResult<Genus> {
        self.taxonomy
            .find_genus(id)
            .await?
            .ok_or_else(|| DomainError::not_found(TaxonKind::Genus.resource()))
    }

    pub async fn create_genus(&self, name: &str) -> DomainResult<Genus> {
        let name = TaxonKind::Genus.validate_name(name)?;
        let genus = self.taxonomy.create_genus(&name).await?;
        tracing::info!(id = genus.id, name = %genus.name, "Created genus");
        Ok(genus)
    }

    pub async fn list_sectors(&self) -> DomainResult<Vec<Sector>> {
        self.taxonomy.list_sectors().await
    }

    pub async fn get_sector(&self, id: i64) -> DomainResult<Sector> {
        self.taxonomy
            .find_sector(id)
            .await?
            .ok_or_else(|| DomainError::not_found(TaxonKind::Sector.resource()))
    }

    pub async fn create_sector(&self, name: &str) -> DomainResult<Sector> {
        let name = TaxonKind::Sector.validate_name(name)?;
        let sector = self.taxonomy.create_sector(&name).await?;
        tracing::info!(id = sector.id, name = %sector.name, "Created sector");
        Ok(sector)
    }

    /// Plants of one sector with their family and genus names
    pub async fn list_plants(&self, sector_id: i64) -> DomainResult<Vec<PlantWithTaxonomy>> {
        if sector_id <= 0 {
            return Err(ValidationError::InvalidFormat {
                field: "sector_id".to_string(),
            }
            .into());
        }
        self.get_sector(sector_id).await?;
        self.plants.list_by_sector(sector_id).await
    }

    pub async fn get_plant(&self, id: i64) -> DomainResult<Plant> {
        self.plants
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Plant"))
    }

    /// Validate and store a new plant
    ///
    /// Field checks and reference checks are reported together.
    pub async fn add_plant(&self, draft: PlantDraft) -> DomainResult<Plant> {
        let family_id = draft.family_id;
        let genus_id = draft.genus_id;
        let sector_id = draft.sector_id;

        let (plant, mut errors) = match draft.parse() {
            Ok(plant) => (Some(plant), Vec::new()),
            Err(errors) => (None, errors),
        };

        let sector_id = Some(sector_id).filter(|id| *id > 0);
        errors.extend(self.missing_references(family_id, genus_id, sector_id).await?);

        let plant = match plant {
            Some(plant) if errors.is_empty() => plant,
            _ => {
                tracing::debug!(count = errors.len(), "Rejected plant payload");
                return Err(ValidationError::Multiple { errors }.into());
            }
        };

        let plant = self.plants.create(plant).await?;
        tracing::info!(id = plant.id, sector_id = plant.details.sector_id, "Added plant");
        Ok(plant)
    }

    /// Apply several partial updates atomically
    ///
    /// Fails with `NotFound` and changes nothing when any id is unknown.
    /// Field errors, dangling references and a missing biometric id are
    /// reported together. Returns the number of plants written.
    pub async fn batch_update(&self, patches: Vec<PlantPatch>) -> DomainResult<usize> {
        if patches.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "plants".to_string(),
            }
            .into());
        }

        let mut errors = validate_patches(&patches);
        let mut checked = BTreeSet::new();
        for patch in &patches {
            let sector_id = patch.sector_id.filter(|id| *id > 0);
            for error in self
                .missing_references(patch.family_id, patch.genus_id, sector_id)
                .await?
            {
                if checked.insert(error.clone()) {
                    errors.push(error);
                }
            }
        }
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "Rejected plant patches");
            return Err(ValidationError::Multiple { errors }.into());
        }

        let ids: Vec<i64> = patches
            .iter()
            .map(|p| p.plant_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut plants: HashMap<i64, Plant> = self
            .plants
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !plants.contains_key(*id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DomainError::not_found(format!(
                "Plants with ids {}",
                missing.join(", ")
            )));
        }

        for patch in &patches {
            if let Some(plant) = plants.get_mut(&patch.plant_id) {
                patch.apply_to(&mut plant.details);
            }
        }

        let updated: Vec<Plant> = ids.iter().filter_map(|id| plants.remove(id)).collect();

        let errors: Vec<String> = updated
            .iter()
            .filter(|p| {
                p.details.sector_id == BIOMETRIC_SECTOR_ID && p.details.biometric_id.is_none()
            })
            .map(|p| {
                format!(
                    "biometric_id is required for sector_id = {} (plant {}).",
                    BIOMETRIC_SECTOR_ID, p.id
                )
            })
            .collect();
        if !errors.is_empty() {
            return Err(ValidationError::Multiple { errors }.into());
        }
        self.plants.update_many(&updated).await?;

        tracing::info!(count = updated.len(), "Batch updated plants");
        Ok(updated.len())
    }

    pub async fn delete_plant(&self, id: i64) -> DomainResult<()> {
        if id <= 0 {
            return Err(ValidationError::InvalidFormat {
                field: "plant_id".to_string(),
            }
            .into());
        }
        if !self.plants.delete(id).await? {
            return Err(DomainError::not_found("Plant"));
        }
        tracing::info!(id, "Deleted plant");
        Ok(())
    }

    /// Delete the existing plants among `ids`
    ///
    /// Fails with `NotFound` only when none of them exists.
    pub async fn batch_delete(&self, ids: Vec<i64>) -> DomainResult<u64> {
        if ids.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "plant_ids".to_string(),
            }
            .into());
        }

        let removed = self.plants.delete_many(&ids).await?;
        if removed == 0 {
            return Err(DomainError::not_found("Plants with the given ids"));
        }

        tracing::info!(requested = ids.len(), removed, "Batch deleted plants");
        Ok(removed)
    }

    /// Messages for each given reference that has no row
    async fn missing_references(
        &self,
        family_id: Option<i64>,
        genus_id: Option<i64>,
        sector_id: Option<i64>,
    ) -> DomainResult<Vec<String>> {
        let mut errors = Vec::new();

        if let Some(id) = sector_id {
            if self.taxonomy.find_sector(id).await?.is_none() {
                errors.push(format!("Sector {} does not exist.", id));
            }
        }
        if let Some(id) = family_id {
            if self.taxonomy.find_family(id).await?.is_none() {
                errors.push(format!("Plant family {} does not exist.", id));
            }
        }
        if let Some(id) = genus_id {
            if self.taxonomy.find_genus(id).await?.is_none() {
                errors.push(format!("Genus {} does not exist.", id));
            }
        }

        Ok(errors)
    }

    /// Markers for every plant placed on the map
    pub async fn map_markers(&self) -> DomainResult<Vec<PlantMarker>> {
        let plants = self.plants.list_with_coordinates().await?;
        Ok(plants.iter().filter_map(PlantMarker::from_plant).collect())
    }
}

fn validate_patches(patches: &[PlantPatch]) -> Vec<String> {
    let mut errors = Vec::new();

    for patch in patches {
        if patch.plant_id <= 0 {
            errors.push(format!("Invalid plant_id {}.", patch.plant_id));
        }
        if matches!(patch.sector_id, Some(id) if id <= 0) {
            errors.push(format!("Invalid sector_id for plant {}.", patch.plant_id));
        }
        if matches!(patch.latitude, Some(v) if !(-90.0..=90.0).contains(&v)) {
            errors.push(format!("Latitude out of range for plant {}.", patch.plant_id));
        }
        if matches!(patch.longitude, Some(v) if !(-180.0..=180.0).contains(&v)) {
            errors.push(format!("Longitude out of range for plant {}.", patch.plant_id));
        }
    }

    errors
}
