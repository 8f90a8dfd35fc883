//! Persistencia del seed
//!
//! `SeedDatabase` abre la transacción única de una ejecución de seed y
//! `SeedTransaction` expone las consultas e inserciones que necesita el
//! motor. La implementación de PostgreSQL usa una `sqlx::Transaction`:
//! si no se llama a `commit`, el drop hace rollback.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{Credential, Driver, User, UserInfo};
use crate::utils::errors::AppResult;

/// Fuente de transacciones para el seed
#[async_trait]
pub trait SeedDatabase: Send + Sync {
    type Tx: SeedTransaction;

    async fn begin(&self) -> AppResult<Self::Tx>;
}

/// Operaciones disponibles dentro de la transacción del seed
#[async_trait]
pub trait SeedTransaction: Send {
    async fn find_user_id_by_username(&mut self, username: &str) -> AppResult<Option<Uuid>>;

    async fn insert_user(&mut self, user: &User) -> AppResult<()>;

    async fn insert_credential(&mut self, credential: &Credential) -> AppResult<()>;

    async fn insert_user_info(&mut self, user_info: &UserInfo) -> AppResult<()>;

    async fn insert_driver(&mut self, driver: &Driver) -> AppResult<()>;

    async fn commit(self) -> AppResult<()>;

    async fn rollback(self) -> AppResult<()>;
}

pub struct PgSeedDatabase {
    pool: PgPool,
}

impl PgSeedDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeedDatabase for PgSeedDatabase {
    type Tx = PgSeedTransaction;

    async fn begin(&self) -> AppResult<PgSeedTransaction> {
        let tx = self.pool.begin().await?;
        Ok(PgSeedTransaction { tx })
    }
}

pub struct PgSeedTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl SeedTransaction for PgSeedTransaction {
    async fn find_user_id_by_username(&mut self, username: &str) -> AppResult<Option<Uuid>> {
        let result: Option<(Uuid,)> = sqlx::query_as(r#"SELECT id FROM "user" WHERE username = $1 LIMIT 1"#)
            .bind(username)
            .fetch_optional(&mut *self.tx)
            .await?;

        Ok(result.map(|(id,)| id))
    }

    async fn insert_user(&mut self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO "user" (id, username, email, password_hash, role, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn insert_credential(&mut self, credential: &Credential) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO credential (id, user_id, password_hash, provider)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(credential.id)
        .bind(credential.user_id)
        .bind(&credential.password_hash)
        .bind(&credential.provider)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn insert_user_info(&mut self, user_info: &UserInfo) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_info (id, user_id, first_name, last_name, document_type, document_number, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user_info.id)
        .bind(user_info.user_id)
        .bind(&user_info.first_name)
        .bind(&user_info.last_name)
        .bind(&user_info.document_type)
        .bind(&user_info.document_number)
        .bind(&user_info.phone_number)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn insert_driver(&mut self, driver: &Driver) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO driver (id, user_id, license_number, license_category, license_expiration, status, hire_date, termination_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(driver.id)
        .bind(driver.user_id)
        .bind(&driver.license_number)
        .bind(&driver.license_category)
        .bind(driver.license_expiration)
        .bind(driver.status.as_str())
        .bind(driver.hire_date)
        .bind(driver.termination_date)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self) -> AppResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> AppResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
