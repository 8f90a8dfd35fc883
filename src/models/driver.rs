//! Modelo de Driver

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Estado del conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriverStatus {
    Active,
    Inactive,
    Suspended,
}

impl DriverStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverStatus::Active => "ACTIVE",
            DriverStatus::Inactive => "INACTIVE",
            DriverStatus::Suspended => "SUSPENDED",
        }
    }
}

/// Fila de la tabla driver (1–1 con User)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Driver {
    pub id: Uuid,
    pub user_id: Uuid,
    pub license_number: String,
    pub license_category: String,
    pub license_expiration: DateTime<Utc>,
    pub status: DriverStatus,
    pub hire_date: Option<DateTime<Utc>>,
    pub termination_date: Option<DateTime<Utc>>,
}
