//! Modelos del sistema
//!
//! Filas que escribe el seed. El resto de entidades (Vehicle, Route, Trip…)
//! existen solo como definiciones del catálogo de esquema.

pub mod driver;
pub mod user;

pub use driver::{Driver, DriverStatus};
pub use user::{Credential, User, UserInfo, UserRole, CREDENTIALS_PROVIDER};
