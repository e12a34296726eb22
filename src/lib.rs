//! Points Ledger
//!
//! A small HTTP service that stores user records and keeps a
//! non-negative points counter for each of them:
//! - CRUD endpoints for users under `/api/users` (and `/users`)
//! - Point increment and decrement endpoints
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use anyhow::Context;
use api::state::AppState;
use infrastructure::{
    storage::{PostgresConfig, StorageType, connect_pool, run_storage_migrations},
    user::{InMemoryUserRepository, PostgresUserRepository, RandomUsernameGenerator, UserService},
};
use sqlx::PgPool;
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let backend = StorageType::from_str(&config.storage.backend).with_context(|| {
        format!("Unknown storage backend: {}", config.storage.backend)
    })?;

    info!("Storage backend: {:?}", backend);

    let usernames = Arc::new(RandomUsernameGenerator::from_entropy());

    let state = match backend {
        StorageType::InMemory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            AppState::new(Arc::new(UserService::new(repository, usernames)))
        }
        StorageType::Postgres => {
            let pool = create_pg_pool(config).await?;

            if config.storage.run_migrations {
                let applied = run_storage_migrations(&pool).await?;
                info!(applied, "Storage migrations complete");
            }

            let repository = Arc::new(PostgresUserRepository::new(pool));
            AppState::new(Arc::new(UserService::new(repository, usernames)))
        }
    };

    Ok(state)
}

/// Open the PostgreSQL pool described by the storage settings
pub async fn create_pg_pool(config: &AppConfig) -> anyhow::Result<PgPool> {
    let database_url = config.storage.resolve_database_url().context(
        "PostgreSQL storage requires storage.database_url or the DATABASE_URL environment variable",
    )?;

    let pg_config =
        PostgresConfig::new(database_url).with_max_connections(config.storage.max_connections);

    Ok(connect_pool(&pg_config).await?)
}

/// In-memory application state with a deterministic username generator
pub fn create_in_memory_app_state(seed: u64) -> AppState {
    let repository = Arc::new(InMemoryUserRepository::new());
    let usernames = Arc::new(RandomUsernameGenerator::seeded(seed));

    AppState::new(Arc::new(UserService::new(repository, usernames)))
}
