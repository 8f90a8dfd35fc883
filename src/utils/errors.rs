//! Sistema de manejo de errores
//!
//! Este módulo define la taxonomía de errores de las herramientas de
//! migración y seed. Todos los errores son terminales para la invocación
//! actual: se registran donde ocurren y se propagan hasta el binario.

use thiserror::Error;

use crate::schema::definition::OrderViolation;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot read seed declaration '{path}': {source}")]
    Load {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed seed declaration: {0}")]
    Parse(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Invalid date '{value}' for user '{username}', expected YYYY-MM-DD")]
    DateFormat { username: String, value: String },

    #[error("Schema error on entity {entity}: {source}")]
    Schema {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Schema catalog error: {0}")]
    Catalog(#[from] OrderViolation),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for AppError {
    /// Las violaciones de unicidad o de clave foránea se separan del resto
    /// de errores de base de datos.
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() || db_err.is_foreign_key_violation() {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return AppError::Constraint(format!("{} ({})", db_err.message(), constraint));
            }
        }
        AppError::Database(err)
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Hash(err.to_string())
    }
}

impl AppError {
    /// Código de salida del proceso para este error
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de uso
pub fn usage_error(message: &str) -> AppError {
    AppError::Usage(message.to_string())
}

/// Función helper para crear errores de configuración
pub fn config_error(variable: &str, reason: &str) -> AppError {
    AppError::Config(format!("{}: {}", variable, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_exit_code() {
        assert_eq!(usage_error("unknown-command: foo").exit_code(), 2);
        assert_eq!(AppError::Hash("boom".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_non_database_sqlx_error_is_database() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_date_format_message() {
        let err = AppError::DateFormat {
            username: "bob".to_string(),
            value: "2030-13-40".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("bob"));
        assert!(message.contains("2030-13-40"));
    }

    #[test]
    fn test_config_error_names_variable() {
        let err = config_error("DATABASE_URL", "must be set");
        assert_eq!(err.to_string(), "Configuration error: DATABASE_URL: must be set");
    }
}
