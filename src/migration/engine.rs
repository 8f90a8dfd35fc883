//! Motor de migraciones
//!
//! Aplica, revierte y trunca el esquema definido en el catálogo. Cada
//! operación se ejecuta completa o no se ejecuta: PostgreSQL permite DDL
//! transaccional, así que `apply_schema` y `remove_schema` corren dentro de
//! una transacción, y `reset_data` es una sola sentencia TRUNCATE.

use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, error, info, warn};

use super::status::SchemaStatus;
use crate::schema::{catalog, creation_order, drop_order, truncate_all_sql, validate_order, EntityDef};
use crate::utils::errors::{AppError, AppResult};

pub struct MigrationEngine<'a> {
    pool: &'a PgPool,
}

impl<'a> MigrationEngine<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Crear o completar todas las tablas del catálogo. Idempotente.
    pub async fn apply_schema(&self) -> AppResult<()> {
        info!("🚀 Ejecutando migrate-up...");
        validate_order(catalog())?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for entity in creation_order() {
            if let Err(source) = apply_entity(&mut tx, entity).await {
                error!("❌ Error aplicando la entidad {}: {}", entity.name, source);
                // El drop de la transacción hace rollback
                return Err(AppError::Schema {
                    entity: entity.name,
                    source,
                });
            }
            debug!("✅ Tabla {} al día", entity.table);
        }
        tx.commit().await.map_err(AppError::Database)?;

        info!("✅ migrate-up terminado ({} tablas)", catalog().len());
        Ok(())
    }

    /// Borrar todas las tablas en orden inverso de dependencias
    pub async fn remove_schema(&self) -> AppResult<()> {
        warn!("⚠️ Ejecutando migrate-down (borrando tablas)...");

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        for entity in drop_order() {
            let sql = entity.drop_table_sql();
            if let Err(source) = sqlx::query(&sql).execute(&mut *tx).await {
                error!("❌ Error borrando la tabla {}: {}", entity.table, source);
                return Err(AppError::Schema {
                    entity: entity.name,
                    source,
                });
            }
            debug!("🗑️ Tabla {} borrada", entity.table);
        }
        tx.commit().await.map_err(AppError::Database)?;

        info!("✅ migrate-down terminado");
        Ok(())
    }

    /// Vaciar todas las tablas sin tocar su estructura y reiniciar secuencias.
    /// Una única sentencia: nunca queda un truncado parcial.
    pub async fn reset_data(&self) -> AppResult<()> {
        warn!("⚠️ Ejecutando migrate-reset (truncando todas las tablas)...");

        let sql = truncate_all_sql(drop_order());
        debug!("🧹 {}", sql);

        sqlx::query(&sql).execute(self.pool).await.map_err(|e| {
            error!("❌ Error truncando las tablas en migrate-reset: {}", e);
            AppError::Database(e)
        })?;

        info!("✅ migrate-reset terminado (tablas truncadas)");
        Ok(())
    }

    /// Comparar el esquema desplegado con el catálogo. Solo lectura.
    pub async fn schema_status(&self) -> AppResult<SchemaStatus> {
        let tables: Vec<String> = catalog().iter().map(|e| e.table.to_string()).collect();

        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT table_name::text, column_name::text
            FROM information_schema.columns
            WHERE table_schema = current_schema()
              AND table_name = ANY($1)
            "#,
        )
        .bind(&tables)
        .fetch_all(self.pool)
        .await
        .map_err(|e| {
            error!("❌ Error leyendo information_schema: {}", e);
            AppError::Database(e)
        })?;

        let status = SchemaStatus::from_columns(
            catalog(),
            rows.iter().map(|(t, c)| (t.as_str(), c.as_str())),
        );

        for table in &status.tables {
            if !table.exists {
                warn!("❌ {} ({}) no existe", table.entity, table.table);
            } else if !table.missing_columns.is_empty() {
                warn!(
                    "⚠️ {} ({}) sin columnas: {}",
                    table.entity,
                    table.table,
                    table.missing_columns.join(", ")
                );
            } else {
                info!("✅ {} ({}) al día", table.entity, table.table);
            }
        }

        Ok(status)
    }
}

/// CREATE TABLE, columnas añadidas desde la última versión e índices
async fn apply_entity(tx: &mut Transaction<'_, Postgres>, entity: &EntityDef) -> Result<(), sqlx::Error> {
    let create = entity.create_table_sql();
    sqlx::query(&create).execute(&mut **tx).await?;

    for statement in entity.add_columns_sql() {
        sqlx::query(&statement).execute(&mut **tx).await?;
    }

    for statement in entity.create_indexes_sql() {
        sqlx::query(&statement).execute(&mut **tx).await?;
    }

    Ok(())
}
