//! Seeds
//!
//! Carga de declaraciones y motor de seed. Cada categoría de seed es un
//! pipeline independiente; `seed-all` las recorre todas en orden.

pub mod engine;
pub mod loader;

pub use engine::{SeedEngine, SeedReport};
pub use loader::{SeedDeclarationLoader, SeedUserRecord};

/// Categorías de datos iniciales
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedCategory {
    Users,
}

impl SeedCategory {
    /// Todas las categorías, en orden de dependencias
    pub const ALL: &'static [SeedCategory] = &[SeedCategory::Users];

    pub fn name(&self) -> &'static str {
        match self {
            SeedCategory::Users => "users",
        }
    }
}
