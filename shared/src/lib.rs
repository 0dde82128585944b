//! Shared utilities and common types for the BotGarden server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Response envelopes
//! - Utility functions (coordinate parsing)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, DefaultAdminConfig,
    Environment, JwtConfig, LoggingConfig, ServerConfig,
};
pub use types::{ApiResponse, ErrorResponse};
pub use utils::coordinates;
