//! Servicio de hash de contraseñas
//!
//! El seed solo necesita una función de un solo sentido; el trait permite
//! sustituir bcrypt en los tests.

use bcrypt::{hash, DEFAULT_COST};

use crate::utils::errors::AppResult;

/// Hash de un solo sentido para contraseñas en texto plano
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> AppResult<String>;
}

/// Implementación con bcrypt
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> AppResult<String> {
        Ok(hash(plaintext, self.cost)?)
    }
}
