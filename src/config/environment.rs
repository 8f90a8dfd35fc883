//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno de las herramientas
//! de migración y seed.

use std::env;
use std::path::PathBuf;

use crate::utils::errors::{config_error, AppResult};

/// Ruta por defecto de la declaración de usuarios
pub const DEFAULT_SEED_USERS_FILE: &str = "data/seeds/user.yml";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub log_level: tracing::Level,
    pub seed_users_file: PathBuf,
    pub bcrypt_cost: u32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: tracing::Level::INFO,
            seed_users_file: PathBuf::from(DEFAULT_SEED_USERS_FILE),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let log_level = match env::var("LOG_LEVEL") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| config_error("LOG_LEVEL", "must be one of TRACE, DEBUG, INFO, WARN, ERROR"))?,
            Err(_) => defaults.log_level,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => {
                let cost: u32 = value
                    .trim()
                    .parse()
                    .map_err(|_| config_error("BCRYPT_COST", "must be a valid number"))?;
                if !(4..=31).contains(&cost) {
                    return Err(config_error("BCRYPT_COST", "must be between 4 and 31"));
                }
                cost
            }
            Err(_) => defaults.bcrypt_cost,
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level,
            seed_users_file: env::var("SEED_USERS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.seed_users_file),
            bcrypt_cost,
        })
    }
}
