//! Modelos de usuario
//!
//! User, UserInfo y Credential tal como los escribe el seed. Los
//! timestamps los asigna el servidor (DEFAULT now()).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Proveedor de las credenciales locales
pub const CREDENTIALS_PROVIDER: &str = "credentials";

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Driver,
    Dispatcher,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Driver => "DRIVER",
            UserRole::Dispatcher => "DISPATCHER",
        }
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(UserRole::Admin),
            "DRIVER" => Ok(UserRole::Driver),
            "DISPATCHER" => Ok(UserRole::Dispatcher),
            other => Err(AppError::Parse(format!(
                "unknown role `{}`, expected one of ADMIN, DRIVER, DISPATCHER",
                other
            ))),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fila de la tabla "user"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
}

impl User {
    /// Usuario activo nuevo con identificador generado
    pub fn new(username: &str, email: &str, role: UserRole, password_hash: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            role,
            is_active: true,
        }
    }
}

/// Fila de la tabla user_info (1–1 con User)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub document_type: String,
    pub document_number: String,
    pub phone_number: String,
}

/// Fila de la tabla credential
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credential {
    pub id: Uuid,
    pub user_id: Uuid,
    pub password_hash: String,
    pub provider: String,
}

impl Credential {
    /// Credencial local para un hash ya calculado
    pub fn local(user_id: Uuid, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            password_hash,
            provider: CREDENTIALS_PROVIDER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_names() {
        assert_eq!(UserRole::Admin.as_str(), "ADMIN");
        assert_eq!(UserRole::Dispatcher.to_string(), "DISPATCHER");

        let role: UserRole = serde_yaml::from_str("DRIVER").unwrap();
        assert_eq!(role, UserRole::Driver);
        assert!(serde_yaml::from_str::<UserRole>("driver").is_err());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("DISPATCHER".parse::<UserRole>().unwrap(), UserRole::Dispatcher);
        assert!(matches!("ROOT".parse::<UserRole>(), Err(AppError::Parse(_))));
        assert!(matches!("".parse::<UserRole>(), Err(AppError::Parse(_))));
    }

    #[test]
    fn test_new_user_is_active() {
        let user = User::new("alice", "alice@example.com", UserRole::Admin, None);
        assert!(user.is_active);
        assert!(user.password_hash.is_none());
        assert_ne!(user.id, Uuid::nil());
    }

    #[test]
    fn test_local_credential_provider() {
        let user_id = Uuid::new_v4();
        let credential = Credential::local(user_id, "hash".to_string());
        assert_eq!(credential.provider, "credentials");
        assert_eq!(credential.user_id, user_id);
    }
}
