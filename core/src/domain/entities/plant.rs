//! Plant inventory records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sector whose plants carry a biometric record id
pub const BIOMETRIC_SECTOR_ID: i64 = 2;

/// Descriptive data of a plant, everything except its id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantDetails {
    pub inventory_number: Option<String>,
    pub family_id: Option<i64>,
    pub genus_id: Option<i64>,
    pub sector_id: i64,
    /// Only set in the biometric sector
    pub biometric_id: Option<i64>,
    pub species: Option<String>,
    pub synonyms: Option<String>,
    pub variety: Option<String>,
    pub form: Option<String>,
    pub plant_origin: Option<String>,
    pub natural_habitat: Option<String>,
    pub determined: Option<String>,
    pub ecology_biology: Option<String>,
    pub economic_use: Option<String>,
    pub date_of_planting: Option<NaiveDate>,
    pub originator: Option<String>,
    pub country: Option<String>,
    pub protection_status: Option<String>,
    pub herbarium_presence: bool,
    pub herbarium_duplicate: Option<String>,
    pub filled_out: Option<String>,
    pub image_path: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub note: Option<String>,
    pub observation_date: Option<NaiveDate>,
    pub year_of_observation: Option<i32>,
    pub phenophase_date: Option<NaiveDate>,
    /// Biometric measurement: year, kind and value
    pub measurement_year: Option<i32>,
    pub measurement_type: Option<String>,
    pub measurement_value: Option<f64>,
}

/// Plant ready to be inserted
pub type NewPlant = PlantDetails;

/// Stored plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: i64,
    #[serde(flatten)]
    pub details: PlantDetails,
}

impl Plant {
    pub fn new(id: i64, details: PlantDetails) -> Self {
        Self { id, details }
    }

    /// Both coordinates, when the plant has been placed on the map
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.details.latitude, self.details.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Plant with its family and genus names resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantWithTaxonomy {
    #[serde(flatten)]
    pub plant: Plant,
    pub family_name: Option<String>,
    pub genus_name: Option<String>,
}

/// Map marker for a plant with coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantMarker {
    pub plant_id: i64,
    pub species: Option<String>,
    pub variety: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub note: Option<String>,
}

impl PlantMarker {
    pub fn from_plant(plant: &Plant) -> Option<Self> {
        let (latitude, longitude) = plant.coordinates()?;
        Some(Self {
            plant_id: plant.id,
            species: plant.details.species.clone(),
            variety: plant.details.variety.clone(),
            latitude,
            longitude,
            note: plant.details.note.clone(),
        })
    }
}

/// Partial update of a plant; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantPatch {
    pub plant_id: i64,
    pub inventory_number: Option<String>,
    pub family_id: Option<i64>,
    pub genus_id: Option<i64>,
    pub sector_id: Option<i64>,
    pub biometric_id: Option<i64>,
    pub species: Option<String>,
    pub synonyms: Option<String>,
    pub variety: Option<String>,
    pub form: Option<String>,
    pub plant_origin: Option<String>,
    pub natural_habitat: Option<String>,
    pub determined: Option<String>,
    pub ecology_biology: Option<String>,
    pub economic_use: Option<String>,
    pub date_of_planting: Option<NaiveDate>,
    pub originator: Option<String>,
    pub country: Option<String>,
    pub protection_status: Option<String>,
    pub herbarium_presence: Option<bool>,
    pub herbarium_duplicate: Option<String>,
    pub filled_out: Option<String>,
    pub image_path: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub note: Option<String>,
    pub observation_date: Option<NaiveDate>,
    pub year_of_observation: Option<i32>,
    pub phenophase_date: Option<NaiveDate>,
    pub measurement_year: Option<i32>,
    pub measurement_type: Option<String>,
    pub measurement_value: Option<f64>,
}

fn overwrite<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}

impl PlantPatch {
    /// Copy every present field onto `details`
    pub fn apply_to(&self, details: &mut PlantDetails) {
        overwrite(&mut details.inventory_number, &self.inventory_number);
        overwrite(&mut details.family_id, &self.family_id);
        overwrite(&mut details.genus_id, &self.genus_id);
        overwrite(&mut details.biometric_id, &self.biometric_id);
        overwrite(&mut details.species, &self.species);
        overwrite(&mut details.synonyms, &self.synonyms);
        overwrite(&mut details.variety, &self.variety);
        overwrite(&mut details.form, &self.form);
        overwrite(&mut details.plant_origin, &self.plant_origin);
        overwrite(&mut details.natural_habitat, &self.natural_habitat);
        overwrite(&mut details.determined, &self.determined);
        overwrite(&mut details.ecology_biology, &self.ecology_biology);
        overwrite(&mut details.economic_use, &self.economic_use);
        overwrite(&mut details.date_of_planting, &self.date_of_planting);
        overwrite(&mut details.originator, &self.originator);
        overwrite(&mut details.country, &self.country);
        overwrite(&mut details.protection_status, &self.protection_status);
        overwrite(&mut details.herbarium_duplicate, &self.herbarium_duplicate);
        overwrite(&mut details.filled_out, &self.filled_out);
        overwrite(&mut details.image_path, &self.image_path);
        overwrite(&mut details.latitude, &self.latitude);
        overwrite(&mut details.longitude, &self.longitude);
        overwrite(&mut details.note, &self.note);
        overwrite(&mut details.observation_date, &self.observation_date);
        overwrite(&mut details.year_of_observation, &self.year_of_observation);
        overwrite(&mut details.phenophase_date, &self.phenophase_date);
        overwrite(&mut details.measurement_year, &self.measurement_year);
        overwrite(&mut details.measurement_type, &self.measurement_type);
        overwrite(&mut details.measurement_value, &self.measurement_value);

        if let Some(sector_id) = self.sector_id {
            details.sector_id = sector_id;
        }
        if let Some(presence) = self.herbarium_presence {
            details.herbarium_presence = presence;
        }
    }
}
