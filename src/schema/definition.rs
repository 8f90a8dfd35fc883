//! Definiciones de esquema como datos
//!
//! Cada entidad se describe con columnas, índices y claves foráneas
//! explícitas. El mismo dato alimenta la creación, el borrado, el truncado
//! y la introspección, de modo que el DDL nunca se deriva de la forma en
//! memoria de los modelos.

use std::fmt;

/// Columna de una tabla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
    pub default: Option<&'static str>,
    pub primary_key: bool,
    /// Tabla referenciada por `id`
    pub references: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: &'static str) -> Self {
        Self {
            name,
            sql_type,
            nullable: true,
            default: None,
            primary_key: false,
            references: None,
        }
    }

    pub const fn not_null(self) -> Self {
        Self { nullable: false, ..self }
    }

    pub const fn default_value(self, expr: &'static str) -> Self {
        Self { default: Some(expr), ..self }
    }

    pub const fn primary_key(self) -> Self {
        Self { primary_key: true, nullable: false, ..self }
    }

    pub const fn references(self, table: &'static str) -> Self {
        Self { references: Some(table), ..self }
    }

    /// Fragmento de definición usado en CREATE TABLE y ADD COLUMN
    pub fn definition_sql(&self) -> String {
        let mut sql = format!("{} {}", quote_ident(self.name), self.sql_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY");
        } else if !self.nullable {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        if let Some(table) = self.references {
            sql.push_str(&format!(" REFERENCES {} (\"id\")", quote_ident(table)));
        }
        sql
    }
}

/// Índice secundario de una tabla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    pub unique: bool,
}

impl IndexDef {
    pub const fn index(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self { name, columns, unique: false }
    }

    pub const fn unique(name: &'static str, columns: &'static [&'static str]) -> Self {
        Self { name, columns, unique: true }
    }
}

/// Entidad respaldada por una tabla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDef {
    pub name: &'static str,
    pub table: &'static str,
    pub columns: &'static [ColumnDef],
    pub indexes: &'static [IndexDef],
}

impl EntityDef {
    /// Tablas de las que depende esta entidad, sin repetir
    pub fn dependencies(&self) -> Vec<&'static str> {
        let mut tables: Vec<&'static str> = Vec::new();
        for table in self.columns.iter().filter_map(|c| c.references) {
            if table != self.table && !tables.contains(&table) {
                tables.push(table);
            }
        }
        tables
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn quoted_table(&self) -> String {
        quote_ident(self.table)
    }

    pub fn create_table_sql(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("    {}", c.definition_sql()))
            .collect();
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
            self.quoted_table(),
            columns.join(",\n")
        )
    }

    /// Sentencias ADD COLUMN para tablas creadas con una versión anterior del catálogo
    pub fn add_columns_sql(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.primary_key)
            .map(|c| {
                format!(
                    "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {}",
                    self.quoted_table(),
                    c.definition_sql()
                )
            })
            .collect()
    }

    pub fn create_indexes_sql(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|index| {
                let columns: Vec<String> = index.columns.iter().map(|c| quote_ident(c)).collect();
                format!(
                    "CREATE {}INDEX IF NOT EXISTS {} ON {} ({})",
                    if index.unique { "UNIQUE " } else { "" },
                    quote_ident(index.name),
                    self.quoted_table(),
                    columns.join(", ")
                )
            })
            .collect()
    }

    pub fn drop_table_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {} CASCADE", self.quoted_table())
    }
}

/// Entrecomillar un identificador SQL (`user` es palabra reservada en PostgreSQL)
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Un único TRUNCATE para todas las tablas, en el orden recibido
pub fn truncate_all_sql<'a, I>(entities: I) -> String
where
    I: IntoIterator<Item = &'a EntityDef>,
{
    let tables: Vec<String> = entities.into_iter().map(EntityDef::quoted_table).collect();
    format!("TRUNCATE TABLE {} RESTART IDENTITY CASCADE", tables.join(", "))
}

/// Violación del orden de dependencias del catálogo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderViolation {
    pub entity: &'static str,
    pub depends_on: &'static str,
}

impl fmt::Display for OrderViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity {} references table {} which is not declared before it",
            self.entity, self.depends_on
        )
    }
}

impl std::error::Error for OrderViolation {}

/// Comprobar que cada entidad solo depende de entidades anteriores
pub fn validate_order(entities: &[EntityDef]) -> Result<(), OrderViolation> {
    for (position, entity) in entities.iter().enumerate() {
        for dependency in entity.dependencies() {
            let declared_before = entities[..position].iter().any(|e| e.table == dependency);
            if !declared_before {
                return Err(OrderViolation {
                    entity: entity.name,
                    depends_on: dependency,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT: EntityDef = EntityDef {
        name: "Parent",
        table: "parent",
        columns: &[
            ColumnDef::new("id", "uuid").default_value("gen_random_uuid()").primary_key(),
            ColumnDef::new("code", "varchar(20)").not_null(),
        ],
        indexes: &[IndexDef::unique("idx_parent_code", &["code"])],
    };

    const CHILD: EntityDef = EntityDef {
        name: "Child",
        table: "child",
        columns: &[
            ColumnDef::new("id", "uuid").default_value("gen_random_uuid()").primary_key(),
            ColumnDef::new("parent_id", "uuid").not_null().references("parent"),
        ],
        indexes: &[IndexDef::index("idx_child_parent_id", &["parent_id"])],
    };

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("user"), "\"user\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_column_definition_sql() {
        let column = ColumnDef::new("parent_id", "uuid").not_null().references("parent");
        assert_eq!(
            column.definition_sql(),
            "\"parent_id\" uuid NOT NULL REFERENCES \"parent\" (\"id\")"
        );

        let id = ColumnDef::new("id", "uuid").default_value("gen_random_uuid()").primary_key();
        assert_eq!(id.definition_sql(), "\"id\" uuid PRIMARY KEY DEFAULT gen_random_uuid()");
    }

    #[test]
    fn test_create_table_is_idempotent_sql() {
        let sql = CHILD.create_table_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"child\" ("));
        assert!(sql.contains("REFERENCES \"parent\""));
    }

    #[test]
    fn test_add_columns_skip_primary_key() {
        let statements = CHILD.add_columns_sql();
        assert_eq!(statements.len(), 1);
        assert!(statements[0].contains("ADD COLUMN IF NOT EXISTS \"parent_id\""));
    }

    #[test]
    fn test_create_indexes_sql() {
        assert_eq!(
            PARENT.create_indexes_sql(),
            vec!["CREATE UNIQUE INDEX IF NOT EXISTS \"idx_parent_code\" ON \"parent\" (\"code\")".to_string()]
        );
        assert!(CHILD.create_indexes_sql()[0].starts_with("CREATE INDEX IF NOT EXISTS"));
    }

    #[test]
    fn test_truncate_all_sql_is_single_statement() {
        let sql = truncate_all_sql([&CHILD, &PARENT]);
        assert_eq!(
            sql,
            "TRUNCATE TABLE \"child\", \"parent\" RESTART IDENTITY CASCADE"
        );
    }

    #[test]
    fn test_validate_order() {
        assert!(validate_order(&[PARENT, CHILD]).is_ok());

        let violation = validate_order(&[CHILD, PARENT]).unwrap_err();
        assert_eq!(violation.entity, "Child");
        assert_eq!(violation.depends_on, "parent");
    }
}
