//! Migraciones de esquema
//!
//! Motor que crea, borra y trunca las tablas del catálogo, más la
//! introspección del esquema desplegado.

pub mod engine;
pub mod status;

pub use engine::MigrationEngine;
pub use status::{SchemaStatus, TableStatus};
