//! Storage infrastructure - backend selection, pooling and migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::StorageType;
pub use migrations::{Migration, PostgresMigrator, run_storage_migrations, storage_migrations};
pub use postgres::{PostgresConfig, connect_pool};
