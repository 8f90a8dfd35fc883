//! Estado del esquema desplegado
//!
//! Compara las columnas reales (information_schema) con el catálogo.

use std::collections::{HashMap, HashSet};

use crate::schema::EntityDef;

/// Estado de una tabla del catálogo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStatus {
    pub entity: &'static str,
    pub table: &'static str,
    pub exists: bool,
    pub missing_columns: Vec<&'static str>,
}

impl TableStatus {
    pub fn is_current(&self) -> bool {
        self.exists && self.missing_columns.is_empty()
    }
}

/// Estado de todas las tablas, en orden de catálogo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatus {
    pub tables: Vec<TableStatus>,
}

impl SchemaStatus {
    /// Construir el estado a partir de pares (tabla, columna) existentes
    pub fn from_columns<'a, I>(entities: &[EntityDef], existing: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut columns_by_table: HashMap<&str, HashSet<&str>> = HashMap::new();
        for (table, column) in existing {
            columns_by_table.entry(table).or_default().insert(column);
        }

        let tables = entities
            .iter()
            .map(|entity| match columns_by_table.get(entity.table) {
                Some(columns) => TableStatus {
                    entity: entity.name,
                    table: entity.table,
                    exists: true,
                    missing_columns: entity
                        .columns
                        .iter()
                        .map(|c| c.name)
                        .filter(|name| !columns.contains(name))
                        .collect(),
                },
                None => TableStatus {
                    entity: entity.name,
                    table: entity.table,
                    exists: false,
                    missing_columns: entity.columns.iter().map(|c| c.name).collect(),
                },
            })
            .collect();

        Self { tables }
    }

    pub fn is_current(&self) -> bool {
        self.tables.iter().all(TableStatus::is_current)
    }

    pub fn is_empty_schema(&self) -> bool {
        self.tables.iter().all(|t| !t.exists)
    }

    pub fn missing_tables(&self) -> Vec<&'static str> {
        self.tables.iter().filter(|t| !t.exists).map(|t| t.table).collect()
    }
}
