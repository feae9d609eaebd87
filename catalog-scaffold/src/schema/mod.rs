//! Table schema introspection
//!
//! The generator only needs two questions answered about a database: does a
//! table exist, and what are its columns in physical order. [`SchemaSource`]
//! captures exactly that, with implementations for `SQLite`, `PostgreSQL`
//! and static JSON schema files.

mod file;
mod postgres;
mod sqlite;

pub use file::StaticSchema;
pub use postgres::PostgresSchema;
pub use sqlite::SqliteSchema;

use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One column of an introspected table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Whether the column accepts NULL
    #[serde(default)]
    pub nullable: bool,
    /// Normalized lowercase base type (`varchar`, `int`, `timestamp`, ...)
    #[serde(alias = "type_name", alias = "type")]
    pub sql_type: String,
    /// Declared character length, when the type carries one
    #[serde(default)]
    pub length: Option<u32>,
}

impl ColumnDescriptor {
    /// Create a non-nullable column without a length
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nullable: false,
            sql_type: sql_type.into(),
            length: None,
        }
    }

    /// Mark the column nullable
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the declared length
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }
}

/// Ordered columns of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name as given on the command line
    pub table: String,
    /// Columns in physical order
    pub columns: Vec<ColumnDescriptor>,
}

/// Schema-introspection capability
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Whether `table` exists
    async fn has_table(&self, table: &str) -> Result<bool>;

    /// Columns of `table` in physical order
    async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;
}

/// Read a table's schema, failing fast when it does not exist
///
/// # Errors
///
/// Returns [`ScaffoldError::TableNotFound`] for a missing table, or whatever
/// the source reports while querying.
pub async fn read_schema(source: &dyn SchemaSource, table: &str) -> Result<TableSchema> {
    if !source.has_table(table).await? {
        return Err(ScaffoldError::TableNotFound(table.to_string()));
    }

    let columns = source.columns(table).await?;
    tracing::debug!(table, columns = columns.len(), "Read table schema");

    Ok(TableSchema {
        table: table.to_string(),
        columns,
    })
}

/// Open a schema source for a database URL
///
/// # Errors
///
/// Returns [`ScaffoldError::UnsupportedDatabase`] for unknown schemes and
/// database errors when the connection fails.
pub async fn connect(url: &str) -> Result<Box<dyn SchemaSource>> {
    if url.starts_with("sqlite:") {
        Ok(Box::new(SqliteSchema::connect(url).await?))
    } else if url.starts_with("postgres:") || url.starts_with("postgresql:") {
        Ok(Box::new(PostgresSchema::connect(url).await?))
    } else {
        Err(ScaffoldError::UnsupportedDatabase(url.to_string()))
    }
}

/// Split a declared SQL type such as `VARCHAR(120)` into base name and length
///
/// Only character types carry a length; `DECIMAL(8,2)` yields no length.
pub(crate) fn parse_declared_type(declared: &str) -> (String, Option<u32>) {
    let declared = declared.trim().to_ascii_lowercase();
    let (base, params) = match declared.split_once('(') {
        Some((base, rest)) => (base.trim(), rest.trim_end_matches(')').trim()),
        None => (declared.as_str(), ""),
    };

    // Multi-word names ("double precision", "timestamp with time zone") keep their first word
    let base = match base {
        "character varying" => "varchar",
        "character" => "char",
        other => other.split_whitespace().next().unwrap_or(other),
    };

    let length = match base {
        "varchar" | "char" | "nvarchar" | "nchar" => params.parse().ok(),
        _ => None,
    };

    (base.to_string(), length)
}

/// Denylist of columns that are never fillable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    excluded: HashSet<String>,
}

impl Default for ColumnFilter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXCLUDED.iter().map(ToString::to_string))
    }
}

impl ColumnFilter {
    /// Identity and audit columns excluded by default
    pub const DEFAULT_EXCLUDED: &'static [&'static str] =
        &["id", "created_at", "updated_at", "deleted_at"];

    /// Build a filter from explicit column names
    pub fn new(excluded: impl IntoIterator<Item = String>) -> Self {
        Self {
            excluded: excluded.into_iter().collect(),
        }
    }

    /// Whether `column` may be filled from user input
    #[must_use]
    pub fn is_fillable(&self, column: &str) -> bool {
        !self.excluded.contains(column)
    }

    /// Fillable columns of `schema`, in schema order, without duplicates
    #[must_use]
    pub fn fillable<'a>(&self, schema: &'a TableSchema) -> Vec<&'a ColumnDescriptor> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut fillable = Vec::new();
        for column in &schema.columns {
            if self.is_fillable(&column.name) && seen.insert(column.name.as_str()) {
                fillable.push(column);
            }
        }
        fillable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario_schema() -> TableSchema {
        TableSchema {
            table: "authors".to_string(),
            columns: vec![
                ColumnDescriptor::new("id", "int"),
                ColumnDescriptor::new("title", "varchar").with_length(120),
                ColumnDescriptor::new("bio", "text").nullable(),
            ],
        }
    }

    #[test]
    fn test_fillable_excludes_identity_column() {
        let schema = scenario_schema();
        let names: Vec<_> = ColumnFilter::default()
            .fillable(&schema)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["title", "bio"]);
    }

    #[test]
    fn test_custom_filter() {
        let schema = scenario_schema();
        let filter = ColumnFilter::new(["bio".to_string()]);
        let names: Vec<_> = filter.fillable(&schema).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "title"]);
    }

    #[test]
    fn test_parse_declared_type() {
        assert_eq!(parse_declared_type("VARCHAR(120)"), ("varchar".to_string(), Some(120)));
        assert_eq!(parse_declared_type("char(2)"), ("char".to_string(), Some(2)));
        assert_eq!(parse_declared_type("DECIMAL(8,2)"), ("decimal".to_string(), None));
        assert_eq!(parse_declared_type("INTEGER"), ("integer".to_string(), None));
        assert_eq!(
            parse_declared_type("character varying(40)"),
            ("varchar".to_string(), Some(40))
        );
        assert_eq!(
            parse_declared_type("timestamp with time zone"),
            ("timestamp".to_string(), None)
        );
        assert_eq!(parse_declared_type(""), (String::new(), None));
    }

    #[test]
    fn test_column_descriptor_accepts_type_name_alias() {
        let column: ColumnDescriptor = serde_json::from_str(
            r#"{"name": "title", "nullable": false, "type_name": "varchar", "length": 120}"#,
        )
        .unwrap();
        assert_eq!(column, ColumnDescriptor::new("title", "varchar").with_length(120));
    }

    #[tokio::test]
    async fn test_read_schema_missing_table() {
        let source = StaticSchema::default();
        let result = read_schema(&source, "ghosts").await;
        assert!(matches!(result, Err(ScaffoldError::TableNotFound(t)) if t == "ghosts"));
    }

    #[tokio::test]
    async fn test_read_schema_preserves_order() {
        let schema = scenario_schema();
        let source = StaticSchema::default().with_table("authors", schema.columns.clone());
        let read = read_schema(&source, "authors").await.unwrap();
        assert_eq!(read, schema);
    }

    #[tokio::test]
    async fn test_read_sample_fixture() {
        let read = read_schema(&crate::testing::sample_source(), "products").await.unwrap();
        assert_eq!(read, crate::testing::sample_schema());
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let result = connect("mysql://localhost/app").await;
        assert!(matches!(result, Err(ScaffoldError::UnsupportedDatabase(_))));
    }

    proptest! {
        #[test]
        fn prop_fillable_is_ordered_subset_without_audit_columns(
            names in proptest::collection::vec(
                prop_oneof![
                    Just("id".to_string()),
                    Just("created_at".to_string()),
                    Just("updated_at".to_string()),
                    Just("deleted_at".to_string()),
                    "[a-z]{1,8}",
                ],
                0..12,
            )
        ) {
            let schema = TableSchema {
                table: "things".to_string(),
                columns: names.iter().map(|n| ColumnDescriptor::new(n.clone(), "text")).collect(),
            };
            let fillable: Vec<_> = ColumnFilter::default()
                .fillable(&schema)
                .iter()
                .map(|c| c.name.clone())
                .collect();

            for name in &fillable {
                prop_assert!(!ColumnFilter::DEFAULT_EXCLUDED.contains(&name.as_str()));
                prop_assert!(names.contains(name));
            }

            let unique: HashSet<_> = fillable.iter().collect();
            prop_assert_eq!(unique.len(), fillable.len());

            // Schema order: positions of first occurrences are increasing
            let positions: Vec<_> = fillable
                .iter()
                .map(|n| names.iter().position(|m| m == n).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
