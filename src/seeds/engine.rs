//! Motor de seed
//!
//! Materializa los registros declarados dentro de una única transacción:
//! o se crean todos los usuarios nuevos o no se crea ninguno. La
//! idempotencia se basa exclusivamente en el username.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::loader::SeedUserRecord;
use crate::models::{Credential, Driver, DriverStatus, User, UserInfo};
use crate::repositories::{SeedDatabase, SeedTransaction};
use crate::services::PasswordHasher;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{add_years, start_of_day_utc, validate_date};

/// Vigencia por defecto de una licencia sin fecha declarada
pub const DEFAULT_LICENSE_YEARS: u32 = 5;

/// Resumen de una ejecución confirmada
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub created: Vec<String>,
    pub skipped_existing: Vec<String>,
    pub skipped_empty: usize,
}

impl SeedReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

/// Resultado de sembrar un registro
enum RecordOutcome {
    Created,
    AlreadyExists,
    EmptyUsername,
}

pub struct SeedEngine<H: PasswordHasher> {
    hasher: H,
}

impl<H: PasswordHasher> SeedEngine<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// Sembrar usuarios. Cualquier error deshace la transacción completa.
    pub async fn seed_users<D: SeedDatabase>(
        &self,
        database: &D,
        records: &[SeedUserRecord],
    ) -> AppResult<SeedReport> {
        info!("🌱 Ejecutando seed-users...");

        if records.is_empty() {
            warn!("⚠️ No hay usuarios que sembrar");
            return Ok(SeedReport::default());
        }

        let mut tx = database.begin().await?;
        let mut report = SeedReport::default();

        for record in records {
            match self.seed_user(&mut tx, record).await {
                Ok(RecordOutcome::Created) => report.created.push(record.username.clone()),
                Ok(RecordOutcome::AlreadyExists) => report.skipped_existing.push(record.username.clone()),
                Ok(RecordOutcome::EmptyUsername) => report.skipped_empty += 1,
                Err(e) => {
                    if let Err(rollback_error) = tx.rollback().await {
                        error!("❌ Error haciendo rollback del seed: {}", rollback_error);
                    }
                    return Err(e);
                }
            }
        }

        tx.commit().await?;

        info!(
            "✅ seed-users terminado: {} creados, {} existentes, {} sin username",
            report.created.len(),
            report.skipped_existing.len(),
            report.skipped_empty
        );
        Ok(report)
    }

    async fn seed_user<T: SeedTransaction>(
        &self,
        tx: &mut T,
        record: &SeedUserRecord,
    ) -> AppResult<RecordOutcome> {
        if !record.has_username() {
            warn!("⚠️ Omitiendo usuario sin username");
            return Ok(RecordOutcome::EmptyUsername);
        }
        let username = record.username.as_str();

        let existing = tx
            .find_user_id_by_username(username)
            .await
            .map_err(|e| log_failure("lookup", username, e))?;
        if existing.is_some() {
            info!("⏭️ El usuario {} ya existe, se omite", username);
            return Ok(RecordOutcome::AlreadyExists);
        }

        let password_hash = match record.password() {
            Some(plaintext) => Some(self.hasher.hash(plaintext).map_err(|e| {
                error!("❌ Error hasheando la contraseña del usuario {}: {}", username, e);
                e
            })?),
            None => None,
        };

        let role = record.role.ok_or_else(|| {
            AppError::Parse(format!("record ({}): role is required", username))
        })?;

        let user = User::new(username, &record.email, role, password_hash.clone());
        tx.insert_user(&user)
            .await
            .map_err(|e| log_failure("user", username, e))?;

        if let Some(password_hash) = password_hash {
            let credential = Credential::local(user.id, password_hash);
            tx.insert_credential(&credential)
                .await
                .map_err(|e| log_failure("credential", username, e))?;
        }

        let user_info = build_user_info(user.id, record);
        tx.insert_user_info(&user_info)
            .await
            .map_err(|e| log_failure("user-info", username, e))?;

        if record.is_driver {
            let driver = build_driver(user.id, record, Utc::now())?;
            tx.insert_driver(&driver)
                .await
                .map_err(|e| log_failure("driver", username, e))?;
            debug!("🚚 Conductor creado para {}", username);
        }

        info!("✅ Usuario {} sembrado con rol {}", username, role);
        Ok(RecordOutcome::Created)
    }
}

fn log_failure(row: &str, username: &str, e: AppError) -> AppError {
    error!("❌ Error en {} para el usuario {}: {}", row, username, e);
    e
}

fn build_user_info(user_id: Uuid, record: &SeedUserRecord) -> UserInfo {
    UserInfo {
        id: Uuid::new_v4(),
        user_id,
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        document_type: record.document_type.clone(),
        document_number: record.document_number.clone(),
        phone_number: record.phone_number.clone(),
    }
}

/// Driver activo; sin fecha de licencia declarada se asume `now` + 5 años
fn build_driver(user_id: Uuid, record: &SeedUserRecord, now: DateTime<Utc>) -> AppResult<Driver> {
    let license_expiration = license_expiration(record, now)?;

    Ok(Driver {
        id: Uuid::new_v4(),
        user_id,
        license_number: record.license_number.clone(),
        license_category: record.license_category.clone(),
        license_expiration,
        status: DriverStatus::Active,
        hire_date: None,
        termination_date: None,
    })
}

fn license_expiration(record: &SeedUserRecord, now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
    match record.license_expires_at() {
        Some(value) => validate_date(value).map(start_of_day_utc).map_err(|_| {
            error!("❌ license_expires_at inválida para el usuario {}: {}", record.username, value);
            AppError::DateFormat {
                username: record.username.clone(),
                value: value.to_string(),
            }
        }),
        None => Ok(add_years(now, DEFAULT_LICENSE_YEARS)),
    }
}
