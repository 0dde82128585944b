//! Repository interfaces and their in-memory implementations.

pub mod plant;
pub mod taxonomy;
pub mod user;

pub use plant::{MockPlantRepository, PlantRepository};
pub use taxonomy::{MockTaxonomyRepository, TaxonomyRepository};
pub use user::{MockUserRepository, UserRepository};
