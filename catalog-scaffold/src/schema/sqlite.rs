//! `SQLite` schema introspection

use super::{parse_declared_type, ColumnDescriptor, SchemaSource};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Schema source reading `sqlite_master` and `pragma_table_info`
#[derive(Debug, Clone)]
pub struct SqliteSchema {
    pool: SqlitePool,
}

impl SqliteSchema {
    /// Connect to a `SQLite` database URL
    ///
    /// # Errors
    ///
    /// Returns a database error if the connection cannot be opened.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaSource for SqliteSchema {
    async fn has_table(&self, table: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;
        Ok(count > 0)
    }

    async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            r#"SELECT name, type, "notnull" FROM pragma_table_info(?1) ORDER BY cid"#,
        )
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, declared, not_null)| {
                let (sql_type, length) = parse_declared_type(&declared);
                tracing::trace!(table, column = %name, %declared, "Introspected column");
                ColumnDescriptor {
                    name,
                    nullable: not_null == 0,
                    sql_type,
                    length,
                }
            })
            .collect())
    }
}
