//! CRUD catalog generator orchestrator
//!
//! Coordinates one generation run for a table:
//! - Model
//! - Controller
//! - Form request
//! - Permissions seeder
//! - Index, Create, Edit and Form pages
//! - Route registration
//!
//! Artifacts are independent: a failure in one is recorded and the rest are
//! still produced. The route is registered last.

use super::fragments;
use super::helpers::ModelNames;
use super::output::write_atomic;
use super::routes::{RoutePatch, RoutesRegistry};
use super::templates::{Bindings, TemplateRenderer};
use crate::config::{CatalogConfig, PathSettings};
use crate::error::{Result, ScaffoldError};
use crate::schema::{ColumnDescriptor, ColumnFilter, TableSchema};
use std::fmt;
use std::path::PathBuf;

/// Kind of file produced for a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Model class
    Model,
    /// Resource controller
    Controller,
    /// Form-request validator
    Request,
    /// Permissions seeder
    Seeder,
    /// Listing page
    PageIndex,
    /// Creation page
    PageCreate,
    /// Edit page
    PageEdit,
    /// Shared form component
    PageForm,
}

impl ArtifactKind {
    /// Every artifact, in generation order
    pub const ALL: [Self; 8] = [
        Self::Model,
        Self::Controller,
        Self::Request,
        Self::Seeder,
        Self::PageIndex,
        Self::PageCreate,
        Self::PageEdit,
        Self::PageForm,
    ];

    /// Stub rendered for this artifact
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Controller => "controller",
            Self::Request => "request",
            Self::Seeder => "seeder",
            Self::PageIndex => "react/index",
            Self::PageCreate => "react/create",
            Self::PageEdit => "react/edit",
            Self::PageForm => "react/form",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Model => "model",
            Self::Controller => "controller",
            Self::Request => "form request",
            Self::Seeder => "permissions seeder",
            Self::PageIndex => "index page",
            Self::PageCreate => "create page",
            Self::PageEdit => "edit page",
            Self::PageForm => "form component",
        };
        f.write_str(label)
    }
}

/// Represents a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Artifact this file is
    pub kind: ArtifactKind,
    /// Relative path from project root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

/// Outcome of a full run
#[derive(Debug)]
pub struct GenerationReport {
    /// Names derived from the table
    pub names: ModelNames,
    /// Files written, or that would be written on a dry run
    pub written: Vec<GeneratedFile>,
    /// Artifacts that could not be produced
    pub failed: Vec<(ArtifactKind, ScaffoldError)>,
    /// Routes registry outcome
    pub routes: Result<RoutePatch>,
    /// Whether nothing was written
    pub dry_run: bool,
}

impl GenerationReport {
    /// Whether every artifact and the route registration succeeded
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.routes.is_ok()
    }
}

/// Generator for one table
pub struct ScaffoldGenerator {
    schema: TableSchema,
    names: ModelNames,
    filter: ColumnFilter,
    paths: PathSettings,
}

impl ScaffoldGenerator {
    /// Create a generator for an introspected table
    #[must_use]
    pub fn new(schema: TableSchema, config: &CatalogConfig) -> Self {
        let names = ModelNames::from_table(&schema.table);
        Self {
            schema,
            names,
            filter: config.generator.column_filter(),
            paths: config.paths.clone(),
        }
    }

    fn fillable(&self) -> Vec<&ColumnDescriptor> {
        self.filter.fillable(&self.schema)
    }

    /// Placeholder bindings for one artifact
    #[must_use]
    pub fn bindings(&self, kind: ArtifactKind) -> Bindings {
        let names = &self.names;
        let base = Bindings::new().bind("modelName", &names.model);

        match kind {
            ArtifactKind::Model => base
                .bind("fillable", fragments::fillable_list(&self.fillable()))
                .bind("table", &names.table),
            ArtifactKind::Controller => base
                .bind("modelVariable", &names.variable)
                .bind("tableName", &names.table),
            ArtifactKind::Request => base.bind("rules", fragments::rules_block(&self.fillable())),
            ArtifactKind::Seeder => base.bind("permissions", fragments::permissions_block(names)),
            ArtifactKind::PageIndex => self
                .page_bindings(base)
                .bind("columns", fragments::column_definitions(&self.fillable()))
                .bind("interface", fragments::interface_members(&self.schema.columns)),
            ArtifactKind::PageCreate => self.page_bindings(base),
            ArtifactKind::PageEdit => self
                .page_bindings(base)
                .bind("interface", fragments::interface_members(&self.schema.columns)),
            ArtifactKind::PageForm => base
                .bind("modelVariable", &names.variable)
                .bind("formFields", fragments::form_fields(&self.fillable()))
                .bind("interface", fragments::interface_members(&self.schema.columns)),
        }
    }

    fn page_bindings(&self, base: Bindings) -> Bindings {
        base.bind("modelVariable", &self.names.variable)
            .bind("modelVariablePlural", &self.names.variable_plural)
            .bind("tableName", &self.names.table)
    }

    /// Output path of an artifact, relative to the project root
    #[must_use]
    pub fn output_path(&self, kind: ArtifactKind) -> PathBuf {
        let names = &self.names;
        let pages = self.paths.pages.join(&names.model);
        match kind {
            ArtifactKind::Model => self.paths.models.join(format!("{}.php", names.model)),
            ArtifactKind::Controller => {
                self.paths.controllers.join(format!("{}.php", names.controller()))
            }
            ArtifactKind::Request => self.paths.requests.join(format!("{}.php", names.request())),
            ArtifactKind::Seeder => self.paths.seeders.join(format!("{}.php", names.seeder())),
            ArtifactKind::PageIndex => pages.join("Index.tsx"),
            ArtifactKind::PageCreate => pages.join("Create.tsx"),
            ArtifactKind::PageEdit => pages.join("Edit.tsx"),
            ArtifactKind::PageForm => pages.join("Form.tsx"),
        }
    }

    /// Render one artifact
    ///
    /// # Errors
    ///
    /// Returns the renderer's error for this artifact's stub.
    pub fn generate_one(
        &self,
        kind: ArtifactKind,
        renderer: &TemplateRenderer,
    ) -> Result<GeneratedFile> {
        let content = renderer.render(kind.template_name(), &self.bindings(kind))?;
        let path = self.output_path(kind);
        tracing::debug!(artifact = %kind, path = %path.display(), "Rendered artifact");

        Ok(GeneratedFile {
            kind,
            path,
            content,
            description: format!("{} {kind}", self.names.model),
        })
    }

    /// Render every artifact without writing
    pub fn generate(
        &self,
        renderer: &TemplateRenderer,
    ) -> Vec<(ArtifactKind, Result<GeneratedFile>)> {
        ArtifactKind::ALL
            .into_iter()
            .map(|kind| (kind, self.generate_one(kind, renderer)))
            .collect()
    }

    /// Render everything and report what a real run would do
    ///
    /// Nothing is written; the routes registry is only read.
    pub fn plan(&self, renderer: &TemplateRenderer, registry: &RoutesRegistry) -> GenerationReport {
        let mut report = self.empty_report(true, registry.preview(&self.names));
        for (kind, outcome) in self.generate(renderer) {
            match outcome {
                Ok(file) => report.written.push(file),
                Err(e) => report.failed.push((kind, e)),
            }
        }
        report
    }

    /// Render and write every artifact, then register the route
    ///
    /// Each file is replaced whole; earlier output is overwritten.
    pub fn emit(&self, renderer: &TemplateRenderer, registry: &RoutesRegistry) -> GenerationReport {
        let mut written = Vec::new();
        let mut failed = Vec::new();

        for (kind, outcome) in self.generate(renderer) {
            let result = outcome.and_then(|file| {
                write_atomic(&self.paths.project_root.join(&file.path), &file.content)?;
                Ok(file)
            });
            match result {
                Ok(file) => written.push(file),
                Err(e) => {
                    tracing::warn!(artifact = %kind, error = %e, "Artifact failed");
                    failed.push((kind, e));
                }
            }
        }

        let mut report = self.empty_report(false, registry.patch(&self.names));
        report.written = written;
        report.failed = failed;

        if !report.is_complete() {
            tracing::warn!(
                table = %self.names.table,
                failed = report.failed.len(),
                "Generation finished with failures"
            );
        }

        report
    }

    fn empty_report(&self, dry_run: bool, routes: Result<RoutePatch>) -> GenerationReport {
        GenerationReport {
            names: self.names.clone(),
            written: Vec::new(),
            failed: Vec::new(),
            routes,
            dry_run,
        }
    }
}
