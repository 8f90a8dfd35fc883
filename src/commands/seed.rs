//! Comandos de seed

use std::path::Path;
use tracing::{error, info};

use crate::repositories::SeedDatabase;
use crate::seeds::{SeedCategory, SeedDeclarationLoader, SeedEngine, SeedReport};
use crate::services::PasswordHasher;
use crate::utils::errors::{usage_error, AppError, AppResult};

pub const SEED_USAGE: &str = "Usage: seed [seed-users | seed-all]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedCommand {
    Users,
    All,
    Unknown(String),
}

impl SeedCommand {
    /// Interpretar el primer argumento posicional; por defecto `seed-all`
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            None | Some("seed-all") => SeedCommand::All,
            Some("seed-users") => SeedCommand::Users,
            Some(other) => SeedCommand::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SeedCommand::Users => "seed-users",
            SeedCommand::All => "seed-all",
            SeedCommand::Unknown(name) => name,
        }
    }

    /// Categorías que ejecuta cada comando
    pub fn categories(&self) -> &'static [SeedCategory] {
        match self {
            SeedCommand::Users => &[SeedCategory::Users],
            SeedCommand::All => SeedCategory::ALL,
            SeedCommand::Unknown(_) => &[],
        }
    }

    pub fn usage_error(&self) -> Option<AppError> {
        match self {
            SeedCommand::Unknown(name) => Some(usage_error(&format!("unknown-command: {}", name))),
            _ => None,
        }
    }
}

/// Fuentes de datos de cada categoría
pub struct SeedSources<'a> {
    pub users_file: &'a Path,
}

/// Ejecutar un comando de seed; devuelve un informe por categoría
pub async fn run_seed<D, H>(
    command: &SeedCommand,
    database: &D,
    engine: &SeedEngine<H>,
    sources: &SeedSources<'_>,
) -> AppResult<Vec<(SeedCategory, SeedReport)>>
where
    D: SeedDatabase,
    H: PasswordHasher,
{
    if let Some(err) = command.usage_error() {
        return Err(err);
    }

    let mut reports = Vec::new();
    for category in command.categories() {
        let result = match category {
            SeedCategory::Users => seed_users(database, engine, sources.users_file).await,
        };
        match result {
            Ok(report) => reports.push((*category, report)),
            Err(e) => {
                error!("❌ seed-command-{}-failed ({}): {}", command.name(), category.name(), e);
                return Err(e);
            }
        }
    }

    info!("✅ seed-command-{}-completed-successfully", command.name());
    Ok(reports)
}

async fn seed_users<D, H>(database: &D, engine: &SeedEngine<H>, users_file: &Path) -> AppResult<SeedReport>
where
    D: SeedDatabase,
    H: PasswordHasher,
{
    // La declaración se valida entera antes de abrir la transacción
    let records = SeedDeclarationLoader::load(users_file).await?;
    engine.seed_users(database, &records).await
}
