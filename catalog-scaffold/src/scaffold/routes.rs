//! Idempotent routes registry patching
//!
//! The registry is a shared source file that lists one resource route per
//! generated model, with the controller imported near the top. Patching a
//! registry is a pure text transform ([`patch_text`]) followed by one
//! atomic whole-file write ([`RoutesRegistry::patch`]), so re-running the
//! generator for the same table never duplicates an import or a route.
//!
//! A route or import counts as present when a line starts with its exact
//! text; whatever follows on that line (a trailing comment, say) is ignored.
//! New lines reuse the registry's existing line ending.

use super::helpers::ModelNames;
use super::output::write_atomic;
use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a missing import goes when the registry already has some
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPlacement {
    /// After the last import line anywhere in the file
    #[default]
    LastAnywhere,
    /// After the last line of the first contiguous run of imports
    LastContiguous,
}

/// Syntax of the registry file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteDialect {
    /// A line starting with this is an import candidate
    pub import_prefix: String,
    /// ...and is an import only if it also contains this
    pub import_terminator: String,
    /// Lines that must stay first in the file (`<?php`)
    pub preamble: Vec<String>,
    /// Insertion rule for new imports
    pub placement: ImportPlacement,
    /// Namespace controllers are imported from
    pub controller_namespace: String,
}

impl Default for RouteDialect {
    fn default() -> Self {
        Self {
            import_prefix: "use ".to_string(),
            import_terminator: ";".to_string(),
            preamble: vec!["<?php".to_string()],
            placement: ImportPlacement::LastAnywhere,
            controller_namespace: "App\\Http\\Controllers".to_string(),
        }
    }
}

impl RouteDialect {
    /// Resource route registration for a model
    #[must_use]
    pub fn route_line(&self, names: &ModelNames) -> String {
        format!(
            "Route::resource('{}', {}::class);",
            names.table,
            names.controller()
        )
    }

    /// Controller import for a model
    #[must_use]
    pub fn import_line(&self, names: &ModelNames) -> String {
        format!(
            "{}{}\\{}{}",
            self.import_prefix,
            self.controller_namespace,
            names.controller(),
            self.import_terminator
        )
    }

    fn is_import(&self, line: &str) -> bool {
        line.starts_with(&self.import_prefix) && line.contains(&self.import_terminator)
    }

    fn is_preamble(&self, line: &str) -> bool {
        self.preamble.iter().any(|p| p == line)
    }
}

/// Outcome of patching the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePatch {
    /// The route line was appended
    Added {
        /// Whether the controller import had to be inserted as well
        import_inserted: bool,
    },
    /// The route line was already registered; nothing was written
    AlreadyPresent,
}

impl RoutePatch {
    /// Whether the registry changed
    #[must_use]
    pub const fn is_added(self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

fn logical(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn starts_any_line(lines: &[&str], wanted: &str) -> bool {
    lines.iter().any(|line| line.starts_with(wanted))
}

/// Line ending of the first line, `\n` when it has none
fn line_ending(lines: &[&str]) -> &'static str {
    match lines.first() {
        Some(line) if line.ends_with("\r\n") => "\r\n",
        _ => "\n",
    }
}

/// Line index at which a new import should be inserted
///
/// `lines` are the registry's lines without terminators. With no import
/// present the index is just past the leading preamble lines, which is `0`
/// for a dialect without a preamble.
///
/// # Examples
///
/// ```
/// # use catalog_scaffold::scaffold::routes::{import_insertion_index, RouteDialect};
/// let dialect = RouteDialect::default();
/// let lines = ["<?php", "", "use A;", "use B;", "", "Route::get('/', X::class);"];
/// assert_eq!(import_insertion_index(&lines, &dialect), 4);
/// assert_eq!(import_insertion_index(&["<?php", ""], &dialect), 1);
/// ```
#[must_use]
pub fn import_insertion_index(lines: &[&str], dialect: &RouteDialect) -> usize {
    let is_import = |line: &str| dialect.is_import(logical(line));

    let found = match dialect.placement {
        ImportPlacement::LastAnywhere => lines.iter().rposition(|line| is_import(line)),
        ImportPlacement::LastContiguous => {
            lines.iter().position(|line| is_import(line)).map(|first| {
                let run = lines[first..].iter().take_while(|line| is_import(line)).count();
                first + run - 1
            })
        }
    };

    match found {
        Some(last) => last + 1,
        None => lines
            .iter()
            .take_while(|line| dialect.is_preamble(logical(line)))
            .count(),
    }
}

/// Patch registry text for one model
///
/// Returns the outcome and, when something was added, the new text. The
/// route line is appended at the end, on its own line, and the file always
/// ends with a line ending afterwards.
#[must_use]
pub fn patch_text(
    text: &str,
    names: &ModelNames,
    dialect: &RouteDialect,
) -> (RoutePatch, Option<String>) {
    let route = dialect.route_line(names);
    let lines: Vec<&str> = text.split_inclusive('\n').collect();

    if starts_any_line(&lines, &route) {
        return (RoutePatch::AlreadyPresent, None);
    }

    let eol = line_ending(&lines);
    let import = dialect.import_line(names);
    let mut segments: Vec<String> = lines.iter().map(ToString::to_string).collect();
    let import_inserted = !starts_any_line(&lines, &import);

    if import_inserted {
        let index = import_insertion_index(&lines, dialect);
        if let Some(previous) = index.checked_sub(1).and_then(|i| segments.get_mut(i)) {
            if !previous.ends_with('\n') {
                previous.push_str(eol);
            }
        }
        segments.insert(index, format!("{import}{eol}"));
    }

    let mut patched = segments.concat();
    if !patched.is_empty() && !patched.ends_with('\n') {
        patched.push_str(eol);
    }
    patched.push_str(&route);
    patched.push_str(eol);

    (RoutePatch::Added { import_inserted }, Some(patched))
}

/// The routes registry file of a project
#[derive(Debug, Clone)]
pub struct RoutesRegistry {
    path: PathBuf,
    dialect: RouteDialect,
}

impl RoutesRegistry {
    /// Registry at `path` written in `dialect`
    pub fn new(path: impl Into<PathBuf>, dialect: RouteDialect) -> Self {
        Self {
            path: path.into(),
            dialect,
        }
    }

    /// Registry file location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Registry syntax
    #[must_use]
    pub const fn dialect(&self) -> &RouteDialect {
        &self.dialect
    }

    /// What [`Self::patch`] would do, without writing
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] if the registry cannot be read.
    pub fn preview(&self, names: &ModelNames) -> Result<RoutePatch> {
        let text = self.read()?;
        Ok(patch_text(&text, names, &self.dialect).0)
    }

    /// Register the resource route for `names`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] if the registry cannot be read or
    /// replaced.
    pub fn patch(&self, names: &ModelNames) -> Result<RoutePatch> {
        let text = self.read()?;
        let (outcome, patched) = patch_text(&text, names, &self.dialect);

        if let Some(patched) = patched {
            write_atomic(&self.path, &patched)?;
        }

        match outcome {
            RoutePatch::Added { import_inserted } => tracing::info!(
                registry = %self.path.display(),
                table = %names.table,
                import_inserted,
                "Route registered"
            ),
            RoutePatch::AlreadyPresent => tracing::info!(
                registry = %self.path.display(),
                table = %names.table,
                "Route already registered"
            ),
        }

        Ok(outcome)
    }

    fn read(&self) -> Result<String> {
        std::fs::read_to_string(&self.path).map_err(|e| ScaffoldError::io(&self.path, e))
    }
}
