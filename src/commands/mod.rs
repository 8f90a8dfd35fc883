//! Despacho de comandos
//!
//! Cada binario recibe un único argumento posicional que se interpreta
//! como un enum cerrado antes de tocar la base de datos.

pub mod migrate;
pub mod seed;

pub use migrate::{run_migration, MigrationCommand, MIGRATE_USAGE};
pub use seed::{run_seed, SeedCommand, SeedSources, SEED_USAGE};
