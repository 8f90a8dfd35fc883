//! Comandos de migración

use tracing::{error, info};

use crate::migration::MigrationEngine;
use crate::utils::errors::{usage_error, AppError, AppResult};

pub const MIGRATE_USAGE: &str = "Usage: migrate [migrate-up | migrate-down | migrate-reset | migrate-status]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Reset,
    Status,
    Missing,
    Unknown(String),
}

impl MigrationCommand {
    /// Interpretar el primer argumento posicional
    pub fn parse(arg: Option<&str>) -> Self {
        match arg {
            None => MigrationCommand::Missing,
            Some("migrate-up") => MigrationCommand::Up,
            Some("migrate-down") => MigrationCommand::Down,
            Some("migrate-reset") => MigrationCommand::Reset,
            Some("migrate-status") => MigrationCommand::Status,
            Some(other) => MigrationCommand::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            MigrationCommand::Up => "migrate-up",
            MigrationCommand::Down => "migrate-down",
            MigrationCommand::Reset => "migrate-reset",
            MigrationCommand::Status => "migrate-status",
            MigrationCommand::Missing => "",
            MigrationCommand::Unknown(name) => name,
        }
    }

    /// Error de uso para comandos que no se pueden ejecutar
    pub fn usage_error(&self) -> Option<AppError> {
        match self {
            MigrationCommand::Missing => Some(usage_error("missing-migration-command")),
            MigrationCommand::Unknown(name) => Some(usage_error(&format!("unknown-command: {}", name))),
            _ => None,
        }
    }
}

/// Ejecutar un comando de migración con el motor ya construido
pub async fn run_migration(command: &MigrationCommand, engine: &MigrationEngine<'_>) -> AppResult<()> {
    let result = match command {
        MigrationCommand::Up => engine.apply_schema().await,
        MigrationCommand::Down => engine.remove_schema().await,
        MigrationCommand::Reset => engine.reset_data().await,
        MigrationCommand::Status => {
            let status = engine.schema_status().await?;
            if status.is_current() {
                info!("✅ El esquema está al día");
            } else {
                info!("⚠️ Tablas pendientes: {}", status.missing_tables().join(", "));
            }
            Ok(())
        }
        MigrationCommand::Missing | MigrationCommand::Unknown(_) => {
            return Err(command
                .usage_error()
                .unwrap_or_else(|| usage_error("unknown-command")));
        }
    };

    match &result {
        Ok(()) => info!("✅ migration-command-{}-completed-successfully", command.name()),
        Err(e) => error!("❌ migration-command-{}-failed: {}", command.name(), e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(MigrationCommand::parse(Some("migrate-up")), MigrationCommand::Up);
        assert_eq!(MigrationCommand::parse(Some("migrate-down")), MigrationCommand::Down);
        assert_eq!(MigrationCommand::parse(Some("migrate-reset")), MigrationCommand::Reset);
        assert_eq!(MigrationCommand::parse(Some("migrate-status")), MigrationCommand::Status);
    }

    #[test]
    fn test_missing_command_is_usage_error() {
        let command = MigrationCommand::parse(None);
        assert_eq!(command, MigrationCommand::Missing);
        assert!(matches!(command.usage_error(), Some(AppError::Usage(_))));
    }

    #[test]
    fn test_unknown_command_is_usage_error() {
        let command = MigrationCommand::parse(Some("migrate-sideways"));
        assert_eq!(command.name(), "migrate-sideways");
        match command.usage_error() {
            Some(AppError::Usage(message)) => assert!(message.contains("migrate-sideways")),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(MigrationCommand::Up.usage_error().is_none());
    }
}
