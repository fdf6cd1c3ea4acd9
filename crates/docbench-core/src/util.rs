//! General utilities for docbench.
//!
//! Provides shared filesystem helpers used across multiple modules.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Write content to a file atomically using temp + rename.
///
/// The temp file is created next to `path` so the final rename stays on one
/// filesystem. Readers see either the old or the new content, never a partial
/// write. Missing parent directories are created.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content)?;
    // Replacing a file keeps its permissions, not the temp file's 0600
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
