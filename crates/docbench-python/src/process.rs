//! Per-file processing: read, parse, extract, strip, render, write.
//!
//! Each file is one independent unit. Failures become a [`FileOutcome`] value
//! and never cross the file boundary. Docstrings are extracted before anything
//! is removed, so a file whose rewrite fails still contributes its records.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use docbench_core::corpus::SymbolMap;
use docbench_core::error::DocbenchError;
use docbench_core::output::{FailureStage, FileFailure};
use docbench_core::util::write_atomic;

use crate::extract::extract_docstrings;
use crate::parser::{parse_module, ParseError};
use crate::qualname::{QualifiedNameResolver, ResolveError};
use crate::render::{RenderError, Renderer, SpliceRenderer};
use crate::strip::strip_docstrings;
use crate::tree::Module;

/// What to do with a file after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessMode {
    /// Strip docstrings and rewrite the file.
    #[default]
    Strip,
    /// Strip and render, but leave the file untouched.
    DryRun,
}

/// How processing of one file ended.
#[derive(Debug)]
pub enum FileOutcome {
    /// Docstrings were removed (or would be, in a dry run).
    Stripped { removed: usize },
    /// The file had no docstrings.
    Unchanged,
    ReadFailed(io::Error),
    ResolveFailed(ResolveError),
    ParseFailed(ParseError),
    RenderFailed(RenderError),
    WriteFailed(io::Error),
}

impl FileOutcome {
    /// The failed stage and its message, if this is a failure.
    pub fn failure(&self) -> Option<(FailureStage, String)> {
        match self {
            FileOutcome::Stripped { .. } | FileOutcome::Unchanged => None,
            FileOutcome::ReadFailed(e) => Some((FailureStage::Read, e.to_string())),
            FileOutcome::ResolveFailed(e) => Some((FailureStage::Resolve, e.to_string())),
            FileOutcome::ParseFailed(e) => Some((FailureStage::Parse, e.to_string())),
            FileOutcome::RenderFailed(e) => Some((FailureStage::Render, e.to_string())),
            FileOutcome::WriteFailed(e) => Some((FailureStage::Write, e.to_string())),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure().is_some()
    }
}

/// Result of processing one file.
#[derive(Debug)]
pub struct ProcessedFile {
    pub path: PathBuf,
    /// Docstrings extracted before removal. Empty if the file did not parse.
    pub symbols: SymbolMap,
    pub outcome: FileOutcome,
}

impl ProcessedFile {
    /// Report entry for a failed file.
    pub fn failure(&self) -> Option<FileFailure> {
        self.outcome.failure().map(|(stage, message)| FileFailure {
            file: self.path.display().to_string(),
            stage,
            message,
        })
    }

    /// The extracted symbols, or the failure as a [`DocbenchError`].
    pub fn into_result(self) -> Result<SymbolMap, DocbenchError> {
        let file = self.path.display().to_string();
        match self.outcome {
            FileOutcome::Stripped { .. } | FileOutcome::Unchanged => Ok(self.symbols),
            FileOutcome::ReadFailed(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(DocbenchError::FileNotFound { path: file })
            }
            FileOutcome::ReadFailed(err) => Err(DocbenchError::InvalidInput {
                path: file,
                message: err.to_string(),
            }),
            FileOutcome::ParseFailed(ParseError::Syntax { line, col, near }) => {
                Err(DocbenchError::Parse {
                    file,
                    line,
                    col,
                    message: format!("syntax error near `{}`", near),
                })
            }
            FileOutcome::ParseFailed(err) => Err(err.into()),
            FileOutcome::ResolveFailed(err) => Err(err.into()),
            FileOutcome::RenderFailed(err) => Err(err.into()),
            FileOutcome::WriteFailed(err) => Err(DocbenchError::output_write(file, err)),
        }
    }
}

/// A file that has been read and parsed, with its docstrings extracted.
struct LoadedFile {
    source: String,
    module: Module,
    symbols: SymbolMap,
}

fn load(path: &Path, base: &Path) -> Result<LoadedFile, FileOutcome> {
    let names = QualifiedNameResolver::for_file(path, base).map_err(FileOutcome::ResolveFailed)?;
    let source = fs::read_to_string(path).map_err(FileOutcome::ReadFailed)?;
    let module = parse_module(&source).map_err(FileOutcome::ParseFailed)?;
    let symbols = extract_docstrings(&module, &names);
    Ok(LoadedFile {
        source,
        module,
        symbols,
    })
}

/// Extract the docstrings of one file without modifying it.
pub fn extract_file(path: &Path, base: &Path) -> ProcessedFile {
    match load(path, base) {
        Ok(loaded) => ProcessedFile {
            path: path.to_path_buf(),
            symbols: loaded.symbols,
            outcome: FileOutcome::Unchanged,
        },
        Err(outcome) => failed(path, SymbolMap::new(), outcome),
    }
}

/// Extract then strip the docstrings of one file with the default renderer.
pub fn process_file(path: &Path, base: &Path, mode: ProcessMode) -> ProcessedFile {
    process_file_with(path, base, mode, &SpliceRenderer)
}

/// Extract then strip the docstrings of one file.
///
/// The file is rewritten atomically, and only when docstrings were removed
/// and the rendered text parses.
pub fn process_file_with<R: Renderer>(
    path: &Path,
    base: &Path,
    mode: ProcessMode,
    renderer: &R,
) -> ProcessedFile {
    let loaded = match load(path, base) {
        Ok(loaded) => loaded,
        Err(outcome) => return failed(path, SymbolMap::new(), outcome),
    };

    let stripped = strip_docstrings(loaded.module, &loaded.source);
    if stripped.is_unchanged() {
        tracing::debug!("no docstrings in {}", path.display());
        return ProcessedFile {
            path: path.to_path_buf(),
            symbols: loaded.symbols,
            outcome: FileOutcome::Unchanged,
        };
    }

    let rendered = match renderer.render(&loaded.source, &stripped.edits) {
        Ok(rendered) => rendered,
        Err(err) => return failed(path, loaded.symbols, FileOutcome::RenderFailed(err)),
    };

    if mode == ProcessMode::Strip {
        if let Err(err) = write_atomic(path, rendered.as_bytes()) {
            return failed(path, loaded.symbols, FileOutcome::WriteFailed(err));
        }
    }

    tracing::debug!(
        "stripped {} docstrings from {}",
        stripped.removed,
        path.display()
    );
    ProcessedFile {
        path: path.to_path_buf(),
        symbols: loaded.symbols,
        outcome: FileOutcome::Stripped {
            removed: stripped.removed,
        },
    }
}

fn failed(path: &Path, symbols: SymbolMap, outcome: FileOutcome) -> ProcessedFile {
    if let Some((stage, message)) = outcome.failure() {
        tracing::warn!("skipping {} ({:?}): {}", path.display(), stage, message);
    }
    ProcessedFile {
        path: path.to_path_buf(),
        symbols,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbench_core::patch::EditPrimitive;
    use tempfile::TempDir;

    fn write(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn strips_and_reports_symbols() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a/b.py", "class C:\n    \"hi\"\n    def f(self):\n        return 1\n");

        let processed = process_file(&path, dir.path(), ProcessMode::Strip);
        assert!(matches!(processed.outcome, FileOutcome::Stripped { removed: 1 }));
        assert_eq!(processed.symbols.get("a.b.C").map(String::as_str), Some("hi"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "class C:\n    def f(self):\n        return 1\n"
        );
    }

    #[test]
    fn dry_run_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let source = "def f():\n    'doc'\n";
        let path = write(&dir, "m.py", source);

        let processed = process_file(&path, dir.path(), ProcessMode::DryRun);
        assert!(matches!(processed.outcome, FileOutcome::Stripped { removed: 1 }));
        assert_eq!(fs::read_to_string(&path).unwrap(), source);
    }

    #[test]
    fn parse_failure_contributes_nothing() {
        let dir = TempDir::new().unwrap();
        let source = "def broken(:\n    'doc'\n";
        let path = write(&dir, "bad.py", source);

        let processed = process_file(&path, dir.path(), ProcessMode::Strip);
        assert!(matches!(processed.outcome, FileOutcome::ParseFailed(_)));
        assert!(processed.symbols.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), source);
        assert_eq!(processed.failure().unwrap().stage, FailureStage::Parse);
        assert!(matches!(
            processed.into_result(),
            Err(DocbenchError::Parse { line: 1, .. })
        ));
    }

    struct BrokenRenderer;

    impl Renderer for BrokenRenderer {
        fn render(&self, _source: &str, _edits: &[EditPrimitive]) -> Result<String, RenderError> {
            Err(RenderError::Reparse(ParseError::NoTree))
        }
    }

    #[test]
    fn render_failure_keeps_file_and_symbols() {
        let dir = TempDir::new().unwrap();
        let source = "def f():\n    'doc'\n";
        let path = write(&dir, "m.py", source);

        let processed = process_file_with(&path, dir.path(), ProcessMode::Strip, &BrokenRenderer);
        assert!(matches!(processed.outcome, FileOutcome::RenderFailed(_)));
        assert_eq!(processed.symbols.get("m.f").map(String::as_str), Some("doc"));
        assert_eq!(fs::read_to_string(&path).unwrap(), source);
    }

    #[test]
    fn file_outside_base_fails_to_resolve() {
        let dir = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let path = write(&dir, "m.py", "x = 1\n");
        let processed = process_file(&path, other.path(), ProcessMode::Strip);
        assert!(matches!(processed.outcome, FileOutcome::ResolveFailed(_)));
    }

    #[test]
    fn extract_file_does_not_write() {
        let dir = TempDir::new().unwrap();
        let source = "'''Mod.'''\n";
        let path = write(&dir, "pkg/__init__.py", source);
        let processed = extract_file(&path, dir.path());
        assert_eq!(processed.symbols.get("pkg").map(String::as_str), Some("Mod."));
        assert_eq!(fs::read_to_string(&path).unwrap(), source);
    }
}
