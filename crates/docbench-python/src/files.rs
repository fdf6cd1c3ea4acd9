//! Python file collection utilities.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for file operations.
#[derive(Debug, Error)]
pub enum FileError {
    /// File not found.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

// ============================================================================
// File Collection
// ============================================================================

/// Directory names never descended into.
const EXCLUDED_DIRS: &[&str] = &["__pycache__", "node_modules", "venv", "target"];

/// Collect Python files under `root`, sorted by path.
///
/// Hidden entries and the directories in [`EXCLUDED_DIRS`] are skipped. If
/// `root` is itself a file it is returned as the only entry.
pub fn collect_python_files(root: &Path) -> FileResult<Vec<PathBuf>> {
    if !root.exists() {
        return Err(FileError::NotFound {
            path: root.display().to_string(),
        });
    }
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry.file_name()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {}", err);
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "py") {
            files.push(path.to_path_buf());
        }
    }

    // Sort files by path for a deterministic processing order
    files.sort();
    Ok(files)
}

fn is_excluded(name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn collects_sorted_python_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "pkg/b.py");
        touch(dir.path(), "pkg/a.py");
        touch(dir.path(), "pkg/__init__.py");
        touch(dir.path(), "README.md");

        let files = collect_python_files(dir.path()).unwrap();
        let relative: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(relative, vec!["pkg/__init__.py", "pkg/a.py", "pkg/b.py"]);
    }

    #[test]
    fn skips_hidden_and_excluded_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "keep.py");
        touch(dir.path(), ".git/hook.py");
        touch(dir.path(), "__pycache__/cached.py");
        touch(dir.path(), "venv/lib/site.py");
        touch(dir.path(), "node_modules/x.py");

        let files = collect_python_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("keep.py")]);
    }

    #[test]
    fn single_file_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "one.py");
        let file = dir.path().join("one.py");
        assert_eq!(collect_python_files(&file).unwrap(), vec![file.clone()]);
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            collect_python_files(&dir.path().join("missing")),
            Err(FileError::NotFound { .. })
        ));
    }
}
