//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT signing and account configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//!
//! Values are layered: struct defaults, then `config/<environment>.toml`
//! (optional), then `BOTGARDEN__*` environment variables.

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, DefaultAdminConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Prefix for environment variable overrides, e.g. `BOTGARDEN__JWT__KEY`
pub const ENV_PREFIX: &str = "BOTGARDEN";

/// Minimum length in bytes of the HMAC-SHA256 signing key
pub const MIN_JWT_KEY_BYTES: usize = 32;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Account and access-control configuration
    pub auth: AuthConfig,

    /// CORS configuration
    pub cors: CorsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();

        let settings = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", environment.config_name()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;
        app_config.environment = environment;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Reject configurations the server cannot safely run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }

        if let Some(admin) = &self.auth.default_admin {
            if admin.email.trim().is_empty() || admin.password.is_empty() {
                return Err(ConfigError::Invalid(
                    "auth.default_admin requires both email and password".to_string(),
                ));
            }
        }

        Ok(())
    }
}
