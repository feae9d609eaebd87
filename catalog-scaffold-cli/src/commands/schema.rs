//! Table inspection
//!
//! Prints each column with the validation rule and script type the generator
//! would use, without writing anything.

use super::{load_config, open_source};
use anyhow::{Context, Result};
use catalog_scaffold::scaffold::type_map::{script_property_type, ValidationRule};
use catalog_scaffold::schema::{read_schema, TableSchema};
use clap::Args;
use console::style;
use std::path::{Path, PathBuf};

/// Arguments of `catalog-scaffold schema`
#[derive(Debug, Args)]
pub struct SchemaCommand {
    /// Table to inspect
    pub table: String,

    /// Read columns from a JSON schema file instead of a database
    #[arg(long)]
    pub schema_file: Option<PathBuf>,

    /// Database to introspect
    #[arg(long)]
    pub database_url: Option<String>,
}

impl SchemaCommand {
    /// Execute the command
    pub async fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let url = self.database_url.as_deref().or(config.database.url.as_deref());

        let source = open_source(self.schema_file.as_deref(), url).await?;
        let schema = read_schema(&*source, &self.table)
            .await
            .with_context(|| format!("Failed to read schema for '{}'", self.table))?;

        let filter = config.generator.column_filter();
        print!("{}", render_table(&schema, |name| filter.is_fillable(name)));

        Ok(())
    }
}

/// Aligned column listing; excluded columns are marked with `-`
fn render_table(schema: &TableSchema, is_fillable: impl Fn(&str) -> bool) -> String {
    let width = schema
        .columns
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max("column".len());

    let mut out = format!(
        "{}\n\n  {:<width$}  {:<16}  {:<32}  {}\n",
        style(&schema.table).bold(),
        "column",
        "sql type",
        "rule",
        "script type",
    );

    for column in &schema.columns {
        let marker = if is_fillable(&column.name) { " " } else { "-" };
        let sql_type = match column.length {
            Some(length) => format!("{}({length})", column.sql_type),
            None => column.sql_type.clone(),
        };
        out.push_str(&format!(
            "{marker} {:<width$}  {:<16}  {:<32}  {}\n",
            column.name,
            sql_type,
            ValidationRule::for_column(column).to_string(),
            script_property_type(column),
        ));
    }

    out
}
