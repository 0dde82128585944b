//! Catalog service module for the garden inventory

mod draft;
mod service;

#[cfg(test)]
mod tests;

pub use draft::PlantDraft;
pub use service::CatalogService;
