//! Stub management commands
//!
//! - `init` - Write the default stubs into the project for customization
//! - `list` - Show every stub and whether it is customized
//! - `diff` - Show changes from the default

use super::load_config;
use anyhow::{Context, Result};
use catalog_scaffold::scaffold::templates::{
    EmbeddedStubs, StubDirectory, STUB_EXTENSION, TEMPLATE_NAMES,
};
use clap::Subcommand;
use console::{style, Emoji};
use similar::{ChangeTag, TextDiff};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static SKIP: Emoji<'_, '_> = Emoji("• ", "");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static FILE: Emoji<'_, '_> = Emoji("📄 ", "");
static CUSTOM: Emoji<'_, '_> = Emoji("✨ ", "");
static DEFAULT: Emoji<'_, '_> = Emoji("  ", "");

/// Stub management subcommands
#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// Copy the default stubs into the stub directory
    Init {
        /// Stub directory (defaults to `stubs/catalog` under the project root)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Overwrite existing stubs without asking
        #[arg(long)]
        force: bool,
    },
    /// List stubs and their status
    List {
        /// Stub directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Show diff between the default and the customized stub
    Diff {
        /// Stub name (e.g. `react/index`)
        name: String,
        /// Stub directory
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

impl TemplatesCommand {
    /// Execute the templates command
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let resolve =
            |dir: Option<PathBuf>| StubDirectory::new(dir.unwrap_or_else(|| config.stub_dir()));

        match self {
            Self::Init { dir, force } => init_stubs(&resolve(dir), force),
            Self::List { dir } => {
                print!("{}", list_stubs(&resolve(dir)));
                Ok(())
            }
            Self::Diff { name, dir } => {
                print!("{}", diff_stub(&resolve(dir), &name)?);
                Ok(())
            }
        }
    }
}

fn default_stub(name: &str) -> Result<&'static str> {
    EmbeddedStubs::get(name).with_context(|| {
        format!("Unknown stub '{name}'. Known stubs: {}", TEMPLATE_NAMES.join(", "))
    })
}

/// Write every default stub, asking before replacing existing files
fn init_stubs(stubs: &StubDirectory, force: bool) -> Result<()> {
    println!("{FOLDER}Writing default stubs to {}", style(stubs.dir().display()).cyan());
    println!();

    let existing: Vec<&str> = TEMPLATE_NAMES
        .iter()
        .copied()
        .filter(|name| stubs.path_for(name).exists())
        .collect();

    let overwrite = force
        || existing.is_empty()
        || dialoguer::Confirm::new()
            .with_prompt(format!("{} stub(s) already exist. Overwrite them?", existing.len()))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

    let mut written = 0;
    for name in TEMPLATE_NAMES {
        let path = stubs.path_for(name);
        if !overwrite && existing.contains(name) {
            println!("  {SKIP}{}", style(name).dim());
            continue;
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, default_stub(name)?)
            .with_context(|| format!("Failed to write stub: {}", path.display()))?;

        println!("  {CHECK}{}", style(name).green());
        written += 1;
    }

    println!();
    println!("{CHECK}Wrote {written} stubs");
    println!();
    println!("Use them with:");
    println!(
        "  {} {}",
        style("catalog-scaffold generate <table> --stubs").cyan(),
        style(stubs.dir().display()).yellow()
    );

    Ok(())
}

/// Stub names found under the directory (`react/index` for `react/index.stub`)
fn customized(stubs: &StubDirectory) -> BTreeSet<String> {
    WalkDir::new(stubs.dir())
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(stubs.dir()).ok()?;
            if relative.extension()? != STUB_EXTENSION {
                return None;
            }
            let name = relative.with_extension("");
            let parts: Vec<_> = name
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect();
            Some(parts.join("/"))
        })
        .collect()
}

fn list_stubs(stubs: &StubDirectory) -> String {
    let found = customized(stubs);
    let mut out = format!("{FOLDER}Stubs in {}\n\n", style(stubs.dir().display()).cyan());

    let mut total_customized = 0;
    for name in TEMPLATE_NAMES {
        if found.contains(*name) {
            out.push_str(&format!("  {CUSTOM}{}\n", style(name).yellow()));
            total_customized += 1;
        } else {
            out.push_str(&format!("  {DEFAULT}{} (default)\n", style(name).dim()));
        }
    }

    let unknown: Vec<_> = found
        .iter()
        .filter(|name| !TEMPLATE_NAMES.contains(&name.as_str()))
        .collect();
    if !unknown.is_empty() {
        out.push_str(&format!(
            "\n  Unused: {}\n",
            style(unknown.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")).dim()
        ));
    }

    out.push_str(&format!(
        "\n  {} customized, {} default\n",
        style(total_customized).yellow(),
        style(TEMPLATE_NAMES.len() - total_customized).dim()
    ));
    out
}

fn diff_stub(stubs: &StubDirectory, name: &str) -> Result<String> {
    let default_content = default_stub(name)?;
    let path = stubs.path_for(name);
    if !path.exists() {
        anyhow::bail!("Stub '{name}' is not customized ({} does not exist)", path.display());
    }
    let custom_content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read stub: {}", path.display()))?;

    let mut out = format!("{FILE}{}\n\n", style(name).bold());

    let diff = TextDiff::from_lines(default_content, custom_content.as_str());
    if diff.ratio() >= 1.0 {
        out.push_str("  No changes from default\n");
        return Ok(out);
    }

    for change in diff.iter_all_changes() {
        let line = match change.tag() {
            ChangeTag::Delete => style(format!("-{change}")).red().to_string(),
            ChangeTag::Insert => style(format!("+{change}")).green().to_string(),
            ChangeTag::Equal => style(format!(" {change}")).dim().to_string(),
        };
        out.push_str(&line);
        if change.missing_newline() {
            out.push('\n');
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_with_force_writes_all_stubs() {
        let dir = tempdir().unwrap();
        let stubs = StubDirectory::new(dir.path());

        init_stubs(&stubs, true).unwrap();
        for name in TEMPLATE_NAMES {
            let written = std::fs::read_to_string(stubs.path_for(name)).unwrap();
            assert_eq!(written, EmbeddedStubs::get(name).unwrap());
        }
        assert_eq!(customized(&stubs).len(), TEMPLATE_NAMES.len());
    }

    #[test]
    fn test_list_marks_customized() {
        console::set_colors_enabled(false);
        let dir = tempdir().unwrap();
        let stubs = StubDirectory::new(dir.path());
        std::fs::create_dir_all(dir.path().join("react")).unwrap();
        std::fs::write(stubs.path_for("react/index"), "custom").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let out = list_stubs(&stubs);
        assert!(out.contains("react/index\n"));
        assert!(out.contains("model (default)"));
        assert!(out.contains("1 customized, 7 default"));
    }

    #[test]
    fn test_diff_shows_changes() {
        console::set_colors_enabled(false);
        let dir = tempdir().unwrap();
        let stubs = StubDirectory::new(dir.path());
        let custom = EmbeddedStubs::get("model")
            .unwrap()
            .replace("use HasFactory;", "use HasFactory, SoftDeletes;");
        std::fs::write(stubs.path_for("model"), custom).unwrap();

        let out = diff_stub(&stubs, "model").unwrap();
        assert!(out.contains("-    use HasFactory;"));
        assert!(out.contains("+    use HasFactory, SoftDeletes;"));
    }

    #[test]
    fn test_diff_requires_customized_stub() {
        let dir = tempdir().unwrap();
        let stubs = StubDirectory::new(dir.path());
        assert!(diff_stub(&stubs, "model").is_err());
        assert!(diff_stub(&stubs, "react/show").is_err());
    }
}
