//! Services module
//!
//! Servicios externos consumidos por el seed.

pub mod password_service;

pub use password_service::{BcryptPasswordHasher, PasswordHasher};
