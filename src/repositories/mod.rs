//! Repositorios
//!
//! Acceso a PostgreSQL para el seed.

pub mod seed_repository;

pub use seed_repository::{PgSeedDatabase, PgSeedTransaction, SeedDatabase, SeedTransaction};
