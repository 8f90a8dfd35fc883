//! Configuración de base de datos
//!
//! Este módulo maneja la conexión y configuración de PostgreSQL con SQLx.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::utils::errors::{config_error, AppResult};

/// Configuración de la base de datos
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl DatabaseConfig {
    /// Construir la configuración con los valores por defecto para una URL dada
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            // Las herramientas son secuenciales: una conexión basta
            max_connections: 2,
            min_connections: 1,
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(3600),
        }
    }

    /// Leer la configuración de las variables de entorno
    pub fn from_env() -> AppResult<Self> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| config_error("DATABASE_URL", "must be set in environment variables"))?;
        if url.trim().is_empty() {
            return Err(config_error("DATABASE_URL", "must not be empty"));
        }

        let mut config = Self::new(url);
        if let Some(max) = read_u32("DATABASE_MAX_CONNECTIONS")? {
            config.max_connections = max.max(1);
        }
        if let Some(min) = read_u32("DATABASE_MIN_CONNECTIONS")? {
            config.min_connections = min.min(config.max_connections);
        }
        Ok(config)
    }

    /// Crear un nuevo pool de conexiones
    pub async fn create_pool(&self) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .connect(&self.url)
            .await
    }

    /// URL con las credenciales enmascaradas, apta para logs
    pub fn masked_url(&self) -> String {
        mask_database_url(&self.url)
    }
}

fn read_u32(variable: &str) -> AppResult<Option<u32>> {
    match std::env::var(variable) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| config_error(variable, "must be a valid number")),
        Err(_) => Ok(None),
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    if scheme_end > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..scheme_end], &url[at_pos + 1..])
}
