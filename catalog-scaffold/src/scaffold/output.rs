//! Whole-file writes

use crate::error::{Result, ScaffoldError};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Replace `path` with `content` in one step
///
/// Parent directories are created as needed. The content goes to a temporary
/// file in the same directory which is then renamed over the destination, so
/// readers see either the old file or the new one.
///
/// # Errors
///
/// Returns [`ScaffoldError::Io`] naming `path` if any step fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| ScaffoldError::io(dir, e))?;

    let mut file = NamedTempFile::new_in(dir).map_err(|e| ScaffoldError::io(path, e))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| ScaffoldError::io(path, e))?;
    file.persist(path)
        .map_err(|e| ScaffoldError::io(path, e.error))?;

    Ok(())
}
