//! Business services containing domain logic and use cases.

pub mod auth;
pub mod catalog;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use catalog::{CatalogService, PlantDraft};
pub use token::{JwtCodec, TokenService, TokenServiceConfig};
