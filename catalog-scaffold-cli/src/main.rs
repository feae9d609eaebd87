//! catalog-scaffold CLI tool

#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use anyhow::Result;
use catalog_scaffold::error::ScaffoldError;
use clap::{Parser, Subcommand};
use commands::{GenerateCommand, SchemaCommand, TemplatesCommand};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "catalog-scaffold")]
#[command(version)]
#[command(about = "Generate CRUD catalogs from database tables", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./catalog-scaffold.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full CRUD catalog for a table
    Generate(GenerateCommand),
    /// Show a table's columns and how they map
    Schema(SchemaCommand),
    /// Manage customizable stubs
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = catalog_scaffold::observability::init(cli.verbose) {
        eprintln!("{} {e:#}", style("warning:").yellow().bold());
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", style("error:").red().bold());
            exit_code_for(&e)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Generate(command) => command.execute(config).await,
        Commands::Schema(command) => command.execute(config).await.map(|()| ExitCode::SUCCESS),
        Commands::Templates { command } => command.execute(config).map(|()| ExitCode::SUCCESS),
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ScaffoldError>() {
        Some(ScaffoldError::TableNotFound(_)) => ExitCode::from(1),
        _ => ExitCode::from(2),
    }
}
