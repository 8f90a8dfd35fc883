//! Configuración de conexión a PostgreSQL
//!
//! El pool se crea una sola vez en el binario y se pasa por referencia a
//! cada motor; no existe un handle global.

use sqlx::PgPool;
use tracing::{error, info};

use crate::config::database::DatabaseConfig;
use crate::utils::errors::{AppError, AppResult};

/// Crear un pool de conexiones a la base de datos y verificarlo
pub async fn connect(config: &DatabaseConfig) -> AppResult<PgPool> {
    info!("🔗 Conectando a PostgreSQL: {}", config.masked_url());

    let pool = config.create_pool().await.map_err(|e| {
        error!("❌ Error conectando a la base de datos: {}", e);
        AppError::Database(e)
    })?;

    test_connection(&pool).await?;
    info!("✅ PostgreSQL conectado exitosamente");

    Ok(pool)
}

/// Verificar que la conexión funciona
async fn test_connection(pool: &PgPool) -> AppResult<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| {
            error!("❌ La base de datos no responde: {}", e);
            AppError::Database(e)
        })?;
    Ok(())
}
