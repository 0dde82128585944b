use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use bg_api::{create_app, AppState};
use bg_core::services::{AuthService, AuthServiceConfig, CatalogService, TokenService, TokenServiceConfig};
use bg_infra::{DatabasePool, MySqlPlantRepository, MySqlTaxonomyRepository, MySqlUserRepository};
use bg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (defaults, config/<env>.toml, BOTGARDEN__* variables)
    let config = AppConfig::load().context("failed to load configuration")?;

    // RUST_LOG wins over logging.level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(environment = %config.environment, "Starting BotGarden API Server");

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    if !database.health_check().await? {
        anyhow::bail!("database did not answer the health check");
    }
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let pool = database.get_pool().clone();
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let taxonomy_repository = Arc::new(MySqlTaxonomyRepository::new(pool.clone()));
    let plant_repository = Arc::new(MySqlPlantRepository::new(pool));

    let token_service = Arc::new(
        TokenService::new(
            user_repository.clone(),
            &TokenServiceConfig::from(&config.jwt),
        )
        .context("failed to initialise token service")?,
    );
    let jwt_codec = token_service.codec();

    let auth_service = Arc::new(
        AuthService::new(
            user_repository,
            token_service,
            AuthServiceConfig::from(&config.auth),
        )
        .context("failed to initialise auth service")?,
    );

    if let Some(admin) = &config.auth.default_admin {
        auth_service
            .ensure_default_user(&admin.email, &admin.password)
            .await
            .context("failed to create the default administrator")?;
    }

    let catalog_service = Arc::new(CatalogService::new(taxonomy_repository, plant_repository));

    if !config.auth.require_auth {
        tracing::warn!("Catalog routes accept anonymous requests (auth.require_auth = false)");
    }

    let app_state = web::Data::new(AppState::new(
        auth_service,
        catalog_service,
        jwt_codec,
        config.auth.require_auth,
    ));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind to address");

    let cors_config = config.cors.clone();
    let environment = config.environment;

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), &cors_config, environment)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    tracing::info!("Server stopped");

    Ok(())
}
