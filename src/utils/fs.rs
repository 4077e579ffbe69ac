//! File system utilities.
//!
//! Small, synchronous helpers shared by the store and configuration code.
//! Writes go through a temp-file-and-rename sequence so a crash mid-write
//! never leaves a truncated record behind.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tempfile::NamedTempFile;

/// Ensure a directory exists, creating it and all parents if necessary.
///
/// Errors if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        anyhow::bail!("path exists but is not a directory: {}", path.display());
    }
    Ok(())
}

/// Atomically write a string to a file.
///
/// The content is written to a temporary file in the target's directory and
/// renamed into place, so readers observe either the old content or the new
/// content, never a partial write.
pub fn atomic_write_string(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .with_context(|| format!("no parent directory for: {}", path.display()))?;
    ensure_dir(dir)?;

    let temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in: {}", dir.display()))?;
    fs::write(temp.path(), content)
        .with_context(|| format!("failed to write temp file for: {}", path.display()))?;
    temp.persist(path)
        .with_context(|| format!("failed to persist file: {}", path.display()))?;
    Ok(())
}
