//! catalog-scaffold: schema-driven CRUD catalog scaffolding
//!
//! Reads one table's columns from a database (or a JSON schema file) and
//! emits the model, controller, form request, permissions seeder and React
//! pages for it, then registers the resource route without ever
//! duplicating it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use catalog_scaffold::prelude::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = CatalogConfig::load(None)?;
//! let source = StaticSchema::from_json_file("schema.json".as_ref())?;
//! let schema = read_schema(&source, "products").await?;
//!
//! let renderer = TemplateRenderer::from_settings(
//!     config.render_stub_dir().as_deref(),
//!     config.templates.unbound_placeholders,
//! );
//! let registry = RoutesRegistry::new(config.paths.routes_file(), config.routes.clone());
//!
//! let report = ScaffoldGenerator::new(schema, &config).emit(&renderer, &registry);
//! assert!(report.is_complete());
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`schema`] - table introspection (`SQLite`, `PostgreSQL`, JSON files)
//! - [`scaffold`] - type mapping, stub rendering, artifact emission and route patching
//! - [`config`] - layered configuration
//! - [`observability`] - logging setup

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod observability;
pub mod scaffold;
pub mod schema;

#[cfg(test)]
pub mod testing;

pub mod prelude {
    //! Convenience re-exports for common types and traits

    pub use crate::config::CatalogConfig;
    pub use crate::error::{Result, ScaffoldError};
    pub use crate::scaffold::{
        ArtifactKind, GeneratedFile, GenerationReport, ModelNames, RoutePatch, RoutesRegistry,
        ScaffoldGenerator, TemplateRenderer, UnboundPlaceholders,
    };
    pub use crate::schema::{
        connect, read_schema, ColumnDescriptor, SchemaSource, StaticSchema, TableSchema,
    };
}
