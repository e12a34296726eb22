//! Migrate command - applies embedded PostgreSQL migrations

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::storage::{PostgresMigrator, run_storage_migrations, storage_migrations};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recent applied migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    let pool = crate::create_pg_pool(&config).await?;
    let migrator = PostgresMigrator::new(pool.clone());

    if args.revert {
        let Some(version) = migrator.current_version().await? else {
            info!("No applied migrations to revert");
            return Ok(());
        };

        if let Some(migration) = storage_migrations().iter().find(|m| m.version == version) {
            migrator.revert_migration(migration).await?;
        } else {
            anyhow::bail!("Applied migration {} is not known to this build", version);
        }

        return Ok(());
    }

    let applied = run_storage_migrations(&pool).await?;

    info!(
        applied,
        current = ?migrator.current_version().await?,
        "Migrations complete"
    );

    Ok(())
}
