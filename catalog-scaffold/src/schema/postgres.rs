//! `PostgreSQL` schema introspection

use super::{ColumnDescriptor, SchemaSource};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Schema source reading `information_schema` in the current schema
#[derive(Debug, Clone)]
pub struct PostgresSchema {
    pool: PgPool,
}

impl PostgresSchema {
    /// Connect to a `PostgreSQL` database URL
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection cannot be opened.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new().max_connections(1).connect(url).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map `udt_name` spellings onto the type names the mapper understands
fn normalize_udt(udt: &str) -> String {
    let udt = udt.to_ascii_lowercase();
    let normalized = match udt.as_str() {
        "int2" => "smallint",
        "int4" => "integer",
        "int8" => "bigint",
        "float4" => "float",
        "float8" => "double",
        "numeric" => "decimal",
        "bpchar" => "char",
        "bool" => "boolean",
        "timestamptz" => "timestamp",
        other => other,
    };
    normalized.to_string()
}

#[async_trait]
impl SchemaSource for PostgresSchema {
    async fn has_table(&self, table: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = current_schema() AND table_name = $1
            )",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows: Vec<(String, String, String, Option<i32>)> = sqlx::query_as(
            "SELECT column_name::text,
                    is_nullable::text,
                    udt_name::text,
                    character_maximum_length::int4
             FROM information_schema.columns
             WHERE table_schema = current_schema() AND table_name = $1
             ORDER BY ordinal_position",
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, is_nullable, udt, length)| ColumnDescriptor {
                name,
                nullable: is_nullable.eq_ignore_ascii_case("YES"),
                sql_type: normalize_udt(&udt),
                length: length.and_then(|l| u32::try_from(l).ok()),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_udt() {
        assert_eq!(normalize_udt("int4"), "integer");
        assert_eq!(normalize_udt("int8"), "bigint");
        assert_eq!(normalize_udt("float8"), "double");
        assert_eq!(normalize_udt("numeric"), "decimal");
        assert_eq!(normalize_udt("timestamptz"), "timestamp");
        assert_eq!(normalize_udt("varchar"), "varchar");
        assert_eq!(normalize_udt("jsonb"), "jsonb");
        assert_eq!(normalize_udt("uuid"), "uuid");
    }
}
