//! Migraciones y datos iniciales de la plataforma de gestión de flota.
//!
//! Dos herramientas de mantenimiento comparten esta librería: `migrate`
//! (crear, borrar o truncar el esquema) y `seed` (sembrar usuarios de
//! forma idempotente desde un fichero YAML).

pub mod commands;
pub mod config;
pub mod database;
pub mod logging;
pub mod migration;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod seeds;
pub mod services;
pub mod utils;

pub use utils::errors::{AppError, AppResult};
