//! Test fixtures
//!
//! - [`sample_schema`] - a `products` table covering every type family the
//!   generator cares about
//! - [`TestProject`] - a throwaway project root with a routes registry

use crate::config::CatalogConfig;
use crate::scaffold::routes::RoutesRegistry;
use crate::schema::{ColumnDescriptor, StaticSchema, TableSchema};
use std::path::Path;
use tempfile::TempDir;

/// Routes registry of a freshly created project
pub const SAMPLE_ROUTES: &str = "<?php

use Illuminate\\Support\\Facades\\Route;
use Inertia\\Inertia;

Route::get('/', function () {
    return Inertia::render('welcome');
})->name('home');
";

/// Columns of the sample `products` table
#[must_use]
pub fn sample_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("id", "bigint"),
        ColumnDescriptor::new("title", "varchar").with_length(120),
        ColumnDescriptor::new("price", "decimal"),
        ColumnDescriptor::new("description", "text").nullable(),
        ColumnDescriptor::new("is_active", "boolean"),
        ColumnDescriptor::new("published_at", "timestamp").nullable(),
        ColumnDescriptor::new("created_at", "timestamp").nullable(),
        ColumnDescriptor::new("updated_at", "timestamp").nullable(),
    ]
}

/// The sample `products` table
#[must_use]
pub fn sample_schema() -> TableSchema {
    TableSchema {
        table: "products".to_string(),
        columns: sample_columns(),
    }
}

/// In-memory schema source holding the sample table
#[must_use]
pub fn sample_source() -> StaticSchema {
    StaticSchema::default().with_table("products", sample_columns())
}

/// Temporary project root
///
/// Removed when dropped.
pub struct TestProject {
    dir: TempDir,
    config: CatalogConfig,
}

impl TestProject {
    /// Create a project with [`SAMPLE_ROUTES`] as its registry
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let mut config = CatalogConfig::default();
        config.paths.project_root = dir.path().to_path_buf();

        let routes = config.paths.routes_file();
        if let Some(parent) = routes.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&routes, SAMPLE_ROUTES)?;

        Ok(Self { dir, config })
    }

    /// Project root
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Configuration rooted at this project
    pub const fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Registry of this project
    pub fn registry(&self) -> RoutesRegistry {
        RoutesRegistry::new(self.config.paths.routes_file(), self.config.routes.clone())
    }

    /// Current registry text
    pub fn routes(&self) -> std::io::Result<String> {
        std::fs::read_to_string(self.config.paths.routes_file())
    }
}
