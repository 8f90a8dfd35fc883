//! Herramienta de seed: `seed [seed-users | seed-all]` (por defecto `seed-all`)

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info};

use fleet_bootstrap::commands::{run_seed, SeedCommand, SeedSources, SEED_USAGE};
use fleet_bootstrap::config::{DatabaseConfig, EnvironmentConfig};
use fleet_bootstrap::repositories::PgSeedDatabase;
use fleet_bootstrap::seeds::SeedEngine;
use fleet_bootstrap::services::BcryptPasswordHasher;
use fleet_bootstrap::{database, logging, AppError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Cargar variables de entorno
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
    info!("🌱 starting-seed-cli ({})", config.environment);

    let arg = std::env::args().nth(1);
    let command = SeedCommand::parse(arg.as_deref());
    if let Some(usage) = command.usage_error() {
        error!("❌ {}", usage);
        eprintln!("{}", SEED_USAGE);
        return Err(usage.into());
    }

    let db_config = DatabaseConfig::from_env().map_err(|e| {
        error!("❌ {}", e);
        e
    })?;
    let pool = database::connect(&db_config).await?;

    let seed_database = PgSeedDatabase::new(pool.clone());
    let engine = SeedEngine::new(BcryptPasswordHasher::new(config.bcrypt_cost));
    let sources = SeedSources {
        users_file: &config.seed_users_file,
    };

    let result = run_seed(&command, &seed_database, &engine, &sources).await;
    pool.close().await;

    for (category, report) in result? {
        info!(
            "📊 {}: {} creados, {} ya existían",
            category.name(),
            report.created_count(),
            report.skipped_existing.len()
        );
    }
    Ok(())
}
