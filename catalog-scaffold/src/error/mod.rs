//! Error types and error handling

use std::path::PathBuf;
use thiserror::Error;

/// Scaffolding error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The requested table does not exist in the inspected database
    #[error("Table '{0}' does not exist in the database")]
    TableNotFound(String),

    /// A stub could not be found in the configured template source
    #[error("Template not found: {name} ({location})")]
    TemplateMissing {
        /// Template name (e.g. `react/index`)
        name: String,
        /// Where the template was looked up
        location: String,
    },

    /// Rendering left `{{placeholder}}` tokens without a binding
    #[error("Template '{template}' has unbound placeholders: {}", names.join(", "))]
    UnboundPlaceholder {
        /// Template name
        template: String,
        /// Placeholder keys that had no binding, in first-seen order
        names: Vec<String>,
    },

    /// Database URL scheme is not one we can introspect
    #[error("Unsupported database URL: {0} (expected sqlite: or postgres:)")]
    UnsupportedDatabase(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JSON schema file could not be parsed
    #[error("Schema file error: {0}")]
    SchemaFile(#[from] serde_json::Error),

    /// Filesystem error tied to a path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ScaffoldError {
    /// Build an [`ScaffoldError::Io`] for `path`
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ScaffoldError>;
