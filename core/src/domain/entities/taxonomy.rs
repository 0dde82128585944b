//! Taxonomy and location reference data: plant families, genera, sectors.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Maximum length of a family, genus, or sector name
pub const NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantFamily {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genus {
    pub id: i64,
    pub name: String,
}

/// Area of the garden a plant belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: i64,
    pub name: String,
}

/// The three name-only reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonKind {
    Family,
    Genus,
    Sector,
}

impl TaxonKind {
    /// Resource name used in error messages
    pub fn resource(&self) -> &'static str {
        match self {
            TaxonKind::Family => "Plant family",
            TaxonKind::Genus => "Genus",
            TaxonKind::Sector => "Sector",
        }
    }

    /// Validate and normalize a name for this table
    pub fn validate_name(&self, name: &str) -> Result<String, ValidationError> {
        let field = match self {
            TaxonKind::Family => "family_name",
            TaxonKind::Genus => "genus_name",
            TaxonKind::Sector => "sector_name",
        };

        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::RequiredField {
                field: field.to_string(),
            });
        }
        if trimmed.chars().count() > NAME_MAX_LENGTH {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: NAME_MAX_LENGTH,
            });
        }
        Ok(trimmed.to_string())
    }
}
