//! Domain entities representing core business objects.

pub mod plant;
pub mod taxonomy;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use plant::{
    NewPlant, Plant, PlantDetails, PlantMarker, PlantPatch, PlantWithTaxonomy, BIOMETRIC_SECTOR_ID,
};
pub use taxonomy::{Genus, PlantFamily, Sector, TaxonKind, NAME_MAX_LENGTH};
pub use token::{
    Claims, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_BYTES,
    REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{Role, StoredRefreshToken, User};
