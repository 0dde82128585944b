//! Unvalidated plant input as submitted by clients

use bg_shared::utils::{parse_latitude, parse_longitude};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::plant::{NewPlant, PlantDetails, BIOMETRIC_SECTOR_ID};

/// Plant creation payload
///
/// Coordinates arrive as text and accept either `.` or `,` as the decimal
/// separator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantDraft {
    pub inventory_number: Option<String>,
    pub family_id: Option<i64>,
    pub genus_id: Option<i64>,
    pub sector_id: i64,
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
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub note: Option<String>,
    pub observation_date: Option<NaiveDate>,
    pub year_of_observation: Option<i32>,
    pub phenophase_date: Option<NaiveDate>,
    pub measurement_year: Option<i32>,
    pub measurement_type: Option<String>,
    pub measurement_value: Option<f64>,
}

impl PlantDraft {
    /// Check the fields that need no storage lookups
    ///
    /// Every problem is reported; the plant is returned only when there are
    /// none.
    pub fn parse(self) -> Result<NewPlant, Vec<String>> {
        let mut errors = Vec::new();

        if self.sector_id <= 0 {
            errors.push("Invalid sector_id provided.".to_string());
        }

        let latitude = match self.latitude.as_deref().map(parse_latitude) {
            Some(Ok(value)) => Some(value),
            Some(Err(e)) => {
                errors.push(format!("Invalid latitude value: {}.", e));
                None
            }
            None => {
                errors.push("Latitude is required.".to_string());
                None
            }
        };

        let longitude = match self.longitude.as_deref().map(parse_longitude) {
            Some(Ok(value)) => Some(value),
            Some(Err(e)) => {
                errors.push(format!("Invalid longitude value: {}.", e));
                None
            }
            None => {
                errors.push("Longitude is required.".to_string());
                None
            }
        };

        let in_biometric_sector = self.sector_id == BIOMETRIC_SECTOR_ID;
        if in_biometric_sector && self.biometric_id.is_none() {
            errors.push(format!(
                "biometric_id is required for sector_id = {}.",
                BIOMETRIC_SECTOR_ID
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PlantDetails {
            inventory_number: self.inventory_number,
            family_id: self.family_id,
            genus_id: self.genus_id,
            sector_id: self.sector_id,
            biometric_id: if in_biometric_sector { self.biometric_id } else { None },
            species: self.species,
            synonyms: self.synonyms,
            variety: self.variety,
            form: self.form,
            plant_origin: self.plant_origin,
            natural_habitat: self.natural_habitat,
            determined: self.determined,
            ecology_biology: self.ecology_biology,
            economic_use: self.economic_use,
            date_of_planting: self.date_of_planting,
            originator: self.originator,
            country: self.country,
            protection_status: self.protection_status,
            herbarium_presence: self.herbarium_presence,
            herbarium_duplicate: self.herbarium_duplicate,
            filled_out: self.filled_out,
            image_path: self.image_path,
            latitude,
            longitude,
            note: self.note,
            observation_date: self.observation_date,
            year_of_observation: self.year_of_observation,
            phenophase_date: self.phenophase_date,
            measurement_year: self.measurement_year,
            measurement_type: self.measurement_type,
            measurement_value: self.measurement_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(sector_id: i64) -> PlantDraft {
        PlantDraft {
            sector_id,
            latitude: Some("55,75".to_string()),
            longitude: Some("37.61".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parses_comma_coordinates() {
        let plant = draft(1).parse().unwrap();
        assert_eq!(plant.latitude, Some(55.75));
        assert_eq!(plant.longitude, Some(37.61));
    }

    #[test]
    fn test_biometric_id_dropped_outside_biometric_sector() {
        let plant = PlantDraft {
            biometric_id: Some(9),
            ..draft(1)
        }
        .parse()
        .unwrap();
        assert!(plant.biometric_id.is_none());

        let plant = PlantDraft {
            biometric_id: Some(9),
            ..draft(BIOMETRIC_SECTOR_ID)
        }
        .parse()
        .unwrap();
        assert_eq!(plant.biometric_id, Some(9));
    }

    #[test]
    fn test_collects_every_error() {
        let errors = PlantDraft {
            sector_id: 0,
            latitude: Some("north".to_string()),
            longitude: Some("200".to_string()),
            ..Default::default()
        }
        .parse()
        .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("sector_id"));
        assert!(errors[1].contains("latitude"));
        assert!(errors[2].contains("longitude"));
    }

    #[test]
    fn test_keeps_observation_fields() {
        let plant = PlantDraft {
            phenophase_date: NaiveDate::from_ymd_opt(2023, 5, 14),
            year_of_observation: Some(2023),
            measurement_type: Some("trunk girth".to_string()),
            measurement_value: Some(41.5),
            ..draft(1)
        }
        .parse()
        .unwrap();

        assert_eq!(plant.phenophase_date, NaiveDate::from_ymd_opt(2023, 5, 14));
        assert_eq!(plant.year_of_observation, Some(2023));
        assert_eq!(plant.measurement_type.as_deref(), Some("trunk girth"));
        assert_eq!(plant.measurement_value, Some(41.5));
        assert!(plant.measurement_year.is_none());
    }

    #[test]
    fn test_biometric_sector_requires_id() {
        let errors = draft(BIOMETRIC_SECTOR_ID).parse().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("biometric_id"));
    }
}
