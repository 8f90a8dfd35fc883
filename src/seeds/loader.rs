//! Cargador de declaraciones de seed
//!
//! Lee el fichero YAML de usuarios iniciales y devuelve registros
//! validados. Un fichero vacío no es un error: el seed no hace nada.

use serde::{Deserialize, Deserializer};
use std::path::Path;
use tracing::{error, info, warn};
use validator::Validate;

use crate::models::UserRole;
use crate::utils::errors::{AppError, AppResult};

/// Usuario declarado en el fichero de seed
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(default)]
pub struct SeedUserRecord {
    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 50))]
    pub username: String,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 120))]
    pub email: String,

    /// Texto plano; se hashea al sembrar
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,

    /// Nombre del rol tal como aparece en el fichero
    #[serde(rename = "role", deserialize_with = "null_as_empty")]
    pub role_name: String,

    /// Rol interpretado por `parse`; solo en registros con username
    #[serde(skip)]
    pub role: Option<UserRole>,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 80))]
    pub first_name: String,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 80))]
    pub last_name: String,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 10))]
    pub document_type: String,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 20))]
    pub document_number: String,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 20))]
    pub phone_number: String,

    #[serde(deserialize_with = "null_as_false")]
    pub is_driver: bool,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 30))]
    pub license_number: String,

    #[serde(deserialize_with = "null_as_empty")]
    #[validate(length(max = 10))]
    pub license_category: String,

    /// "YYYY-MM-DD"; se interpreta al crear el Driver
    #[serde(deserialize_with = "null_as_empty")]
    pub license_expires_at: String,
}

impl SeedUserRecord {
    pub fn password(&self) -> Option<&str> {
        non_empty(&self.password)
    }

    pub fn license_expires_at(&self) -> Option<&str> {
        non_empty(&self.license_expires_at)
    }

    pub fn has_username(&self) -> bool {
        !self.username.is_empty()
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// `campo:` sin valor en YAML equivale a cadena vacía
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// `is_driver:` sin valor equivale a `false`
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

pub struct SeedDeclarationLoader;

impl SeedDeclarationLoader {
    /// Leer y validar el fichero de declaración
    pub async fn load(path: &Path) -> AppResult<Vec<SeedUserRecord>> {
        let content = tokio::fs::read_to_string(path).await.map_err(|source| {
            error!("❌ No se puede leer el fichero {}: {}", path.display(), source);
            AppError::Load {
                path: path.display().to_string(),
                source,
            }
        })?;

        let records = Self::parse(&content).map_err(|e| {
            error!("❌ No se puede interpretar el YAML de {}: {}", path.display(), e);
            e
        })?;

        if records.is_empty() {
            warn!("⚠️ No hay usuarios en {}", path.display());
        } else {
            info!("📄 {} usuarios declarados en {}", records.len(), path.display());
        }
        Ok(records)
    }

    /// Interpretar y validar el contenido YAML
    pub fn parse(content: &str) -> AppResult<Vec<SeedUserRecord>> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Option<Vec<SeedUserRecord>> = serde_yaml::from_str(content)?;
        let mut records = records.unwrap_or_default();

        for (position, record) in records.iter_mut().enumerate() {
            // Los registros sin username se omiten al sembrar, no se validan
            if !record.has_username() {
                continue;
            }

            record.validate().map_err(|e| {
                AppError::Parse(format!("record #{} ({}): {}", position + 1, record.username, e))
            })?;

            if record.role_name.is_empty() {
                return Err(AppError::Parse(format!(
                    "record #{} ({}): role is required",
                    position + 1,
                    record.username
                )));
            }

            let role = record.role_name.parse::<UserRole>().map_err(|e| {
                AppError::Parse(format!("record #{} ({}): {}", position + 1, record.username, e))
            })?;
            record.role = Some(role);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const USERS_YAML: &str = r#"
- username: alice
  email: alice@example.com
  password: pw1
  role: ADMIN
  first_name: Alice
  last_name: Doe
  document_type: DNI
  document_number: "12345678"
  phone_number: "999111222"
  is_driver: false
- username: ""
  role: DRIVER
- username: dave
  role: DRIVER
  password:
  first_name: Dave
  last_name: Roe
  is_driver: true
  license_number: Q12345678
  license_category: A-IIb
  license_expires_at: "2030-06-01"
"#;

    #[test]
    fn test_parse_records() {
        let records = SeedDeclarationLoader::parse(USERS_YAML).unwrap();
        assert_eq!(records.len(), 3);

        let alice = &records[0];
        assert_eq!(alice.username, "alice");
        assert_eq!(alice.role, Some(UserRole::Admin));
        assert_eq!(alice.password(), Some("pw1"));
        assert!(!alice.is_driver);
        assert_eq!(alice.document_number, "12345678");

        assert!(!records[1].has_username());
        assert_eq!(records[1].email, "");

        let dave = &records[2];
        assert!(dave.is_driver);
        assert_eq!(dave.password(), None);
        assert_eq!(dave.license_expires_at(), Some("2030-06-01"));
    }

    #[test]
    fn test_empty_declarations() {
        assert!(SeedDeclarationLoader::parse("").unwrap().is_empty());
        assert!(SeedDeclarationLoader::parse("   \n").unwrap().is_empty());
        assert!(SeedDeclarationLoader::parse("[]").unwrap().is_empty());
        assert!(SeedDeclarationLoader::parse("~").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_structure_is_parse_error() {
        let result = SeedDeclarationLoader::parse("username: alice\nrole: ADMIN\n");
        assert!(matches!(result, Err(AppError::Parse(_))));

        let result = SeedDeclarationLoader::parse("- username: [unclosed");
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn test_unknown_role_is_parse_error() {
        let result = SeedDeclarationLoader::parse("- username: bob\n  role: ROOT\n");
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[test]
    fn test_missing_role_is_parse_error() {
        let result = SeedDeclarationLoader::parse("- username: bob\n");
        match result {
            Err(AppError::Parse(message)) => assert!(message.contains("role is required")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_username_records_skip_role_checks() {
        let content = "- username: alice\n  role: ADMIN\n- username: \"\"\n  role: \"\"\n- username:\n  role: ROOT\n";
        let records = SeedDeclarationLoader::parse(content).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].role, Some(UserRole::Admin));
        assert!(!records[1].has_username());
        assert_eq!(records[1].role, None);
        assert!(!records[2].has_username());
        assert_eq!(records[2].role_name, "ROOT");
        assert_eq!(records[2].role, None);
    }

    #[test]
    fn test_blank_is_driver_is_false() {
        let content = "- username: bob\n  role: DISPATCHER\n  is_driver:\n";
        let records = SeedDeclarationLoader::parse(content).unwrap();
        assert!(!records[0].is_driver);
        assert_eq!(records[0].role, Some(UserRole::Dispatcher));
    }

    #[test]
    fn test_too_long_username_is_parse_error() {
        let content = format!("- username: {}\n  role: ADMIN\n", "a".repeat(51));
        let result = SeedDeclarationLoader::parse(&content);
        assert!(matches!(result, Err(AppError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_load_error() {
        let result = SeedDeclarationLoader::load(Path::new("does/not/exist/user.yml")).await;
        match result {
            Err(AppError::Load { path, .. }) => assert!(path.ends_with("user.yml")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user.yml");
        std::fs::write(&path, USERS_YAML).unwrap();

        let records = SeedDeclarationLoader::load(&path).await.unwrap();
        assert_eq!(records.len(), 3);
    }
}
