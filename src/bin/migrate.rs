//! Herramienta de migraciones: `migrate [migrate-up | migrate-down | migrate-reset | migrate-status]`

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info};

use fleet_bootstrap::commands::{run_migration, MigrationCommand, MIGRATE_USAGE};
use fleet_bootstrap::config::{DatabaseConfig, EnvironmentConfig};
use fleet_bootstrap::migration::MigrationEngine;
use fleet_bootstrap::{database, logging, AppError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Cargar .env primero
    dotenv().ok();

    if let Err(e) = run().await {
        let code = e.downcast_ref::<AppError>().map(AppError::exit_code).unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run() -> Result<()> {
    let config = EnvironmentConfig::from_env().map_err(|e| {
        eprintln!("{}", e);
        e
    })?;
    logging::init(config.log_level);
    info!("🛠️ starting-migration-cli ({})", config.environment);

    let arg = std::env::args().nth(1);
    let command = MigrationCommand::parse(arg.as_deref());
    if let Some(usage) = command.usage_error() {
        error!("❌ {}", usage);
        eprintln!("{}", MIGRATE_USAGE);
        return Err(usage.into());
    }

    let db_config = DatabaseConfig::from_env().map_err(|e| {
        error!("❌ {}", e);
        e
    })?;
    let pool = database::connect(&db_config).await?;

    let engine = MigrationEngine::new(&pool);
    let result = run_migration(&command, &engine).await;
    pool.close().await;

    result?;
    Ok(())
}
