//! In-memory schema, optionally loaded from a JSON schema file
//!
//! ```json
//! {
//!   "tables": {
//!     "products": [
//!       { "name": "id", "nullable": false, "type_name": "bigint" },
//!       { "name": "name", "nullable": false, "type_name": "varchar", "length": 120 }
//!     ]
//!   }
//! }
//! ```

use super::{ColumnDescriptor, SchemaSource};
use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Schema source backed by a fixed set of tables
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticSchema {
    #[serde(default)]
    tables: HashMap<String, Vec<ColumnDescriptor>>,
}

impl StaticSchema {
    /// Add (or replace) a table
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        self.tables.insert(table.into(), columns);
        self
    }

    /// Parse a JSON schema document
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::SchemaFile`] when the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON schema file
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`ScaffoldError::SchemaFile`] when it is malformed.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl SchemaSource for StaticSchema {
    async fn has_table(&self, table: &str) -> Result<bool> {
        Ok(self.tables.contains_key(table))
    }

    async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| ScaffoldError::TableNotFound(table.to_string()))
    }
}
