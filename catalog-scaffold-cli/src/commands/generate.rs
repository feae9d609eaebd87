//! CRUD catalog generation
//!
//! # Example
//!
//! ```bash
//! catalog-scaffold generate products --database-url sqlite://database/database.sqlite
//! catalog-scaffold generate products --schema-file schema.json --dry-run
//! ```

use super::{load_config, open_source};
use anyhow::{Context, Result};
use catalog_scaffold::config::CatalogConfig;
use catalog_scaffold::scaffold::{
    GenerationReport, RoutePatch, RoutesRegistry, ScaffoldGenerator, TemplateRenderer,
    UnboundPlaceholders,
};
use catalog_scaffold::schema::{read_schema, TableSchema};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Arguments of `catalog-scaffold generate`
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Table to scaffold (plural, e.g. `products`)
    pub table: String,

    /// Read columns from a JSON schema file instead of a database
    #[arg(long)]
    pub schema_file: Option<PathBuf>,

    /// Database to introspect (overrides configuration and `DATABASE_URL`)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Project root that output paths are relative to
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// Directory of customized stubs, relative to the project root
    /// (defaults to `stubs/catalog` when that exists)
    #[arg(long)]
    pub stubs: Option<PathBuf>,

    /// Fail an artifact when its stub has unbound placeholders
    #[arg(long)]
    pub strict_placeholders: bool,

    /// Show what would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Execute the command
    ///
    /// Returns a failure exit code when any artifact failed.
    pub async fn execute(&self, config_path: Option<&Path>) -> Result<ExitCode> {
        let config = self.apply_flags(load_config(config_path)?);

        println!(
            "\n{} {} {}",
            style("Scaffolding CRUD catalog for").cyan().bold(),
            style(&self.table).green().bold(),
            style("...").cyan().bold()
        );

        let schema = self.read_schema(&config).await?;

        let renderer = TemplateRenderer::from_settings(
            config.render_stub_dir().as_deref(),
            config.templates.unbound_placeholders,
        );
        let registry = RoutesRegistry::new(config.paths.routes_file(), config.routes.clone());
        let generator = ScaffoldGenerator::new(schema, &config);

        let report = if self.dry_run {
            generator.plan(&renderer, &registry)
        } else {
            generator.emit(&renderer, &registry)
        };

        print_report(&report, &registry);

        if !report.is_complete() {
            println!(
                "\n{} {}",
                style("⚠").yellow().bold(),
                style("Generation was partial; fix the errors above and re-run.").yellow()
            );
            return Ok(ExitCode::from(2));
        }

        if report.dry_run {
            println!("\n{}", style("Dry run: nothing was written.").dim());
        } else {
            print_next_steps(&report, &config);
        }

        Ok(ExitCode::SUCCESS)
    }

    /// Merge command-line flags over the loaded configuration
    fn apply_flags(&self, mut config: CatalogConfig) -> CatalogConfig {
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(root) = &self.project_root {
            config.paths.project_root.clone_from(root);
        }
        if let Some(stubs) = &self.stubs {
            config.templates.dir = Some(stubs.clone());
        }
        if self.strict_placeholders {
            config.templates.unbound_placeholders = UnboundPlaceholders::Reject;
        }
        config
    }

    async fn read_schema(&self, config: &CatalogConfig) -> Result<TableSchema> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        spinner.set_message(format!("Reading schema for {}...", self.table));

        let result = async {
            let source =
                open_source(self.schema_file.as_deref(), config.database.url.as_deref()).await?;
            read_schema(&*source, &self.table)
                .await
                .with_context(|| format!("Failed to read schema for '{}'", self.table))
        }
        .await;

        spinner.finish_and_clear();
        result
    }
}

fn print_report(report: &GenerationReport, registry: &RoutesRegistry) {
    let verb = if report.dry_run { "Would generate" } else { "Generated" };
    println!(
        "\n{} {} files:",
        style(verb).green().bold(),
        report.written.len()
    );

    for file in &report.written {
        println!(
            "  {} {} ({})",
            style("✓").green(),
            style(file.path.display()).dim(),
            style(&file.description).dim()
        );
    }

    for (kind, error) in &report.failed {
        println!("  {} {}: {}", style("✗").red(), style(kind).red(), error);
    }

    let route = registry.dialect().route_line(&report.names);
    let registry_path = registry.path().display();
    match &report.routes {
        Ok(RoutePatch::Added { import_inserted }) => {
            let verb = if report.dry_run { "Would register" } else { "Registered" };
            println!(
                "  {} {} {} in {}",
                style("✓").green(),
                verb,
                style(&route).yellow(),
                style(&registry_path).dim()
            );
            if *import_inserted {
                println!(
                    "    {} {}",
                    style("+").green(),
                    style(registry.dialect().import_line(&report.names)).dim()
                );
            }
        }
        Ok(RoutePatch::AlreadyPresent) => {
            println!(
                "  {} Route already exists in {}, left unchanged",
                style("•").cyan(),
                style(&registry_path).dim()
            );
        }
        Err(e) => {
            println!("  {} routes: {}", style("✗").red(), e);
        }
    }
}

fn print_next_steps(report: &GenerationReport, config: &CatalogConfig) {
    let names = &report.names;

    println!(
        "\n{} CRUD catalog for {} is ready!",
        style("✨").green().bold(),
        style(&names.model).green().bold()
    );

    println!("\n{}", style("Next steps:").cyan().bold());
    println!(
        "  1. Seed the permissions: {}",
        style(format!("php artisan db:seed --class={}", names.seeder())).yellow()
    );
    println!(
        "  2. Assign them to roles as needed: {}",
        style(names.permissions().join(", ")).yellow()
    );
    println!(
        "  3. Review the generated pages in {}",
        style(config.paths.pages.join(&names.model).display()).yellow()
    );
}
