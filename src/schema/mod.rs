//! Catálogo de esquema
//!
//! Definiciones explícitas de las tablas (columnas, tipos, nulabilidad,
//! valores por defecto, índices y claves foráneas) y su orden de
//! dependencias.

pub mod catalog;
pub mod definition;

pub use catalog::{catalog, creation_order, drop_order, find_entity};
pub use definition::{quote_ident, truncate_all_sql, validate_order, ColumnDef, EntityDef, IndexDef};
