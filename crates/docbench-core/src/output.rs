//! JSON output types for CLI responses.
//!
//! Every command prints exactly one JSON document on stdout. Each response
//! starts with `status` and `schema_version`; logs go to stderr.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::corpus::SymbolMap;
use crate::error::{DocbenchError, OutputErrorCode};
use crate::stats::Statistics;

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Errors
// ============================================================================

/// Error details inside an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
}

impl ErrorInfo {
    /// Create from a DocbenchError.
    pub fn from_error(err: &DocbenchError) -> Self {
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
        }
    }
}

/// Response emitted when a command fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a DocbenchError.
    pub fn from_error(err: &DocbenchError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Per-file and per-project reporting
// ============================================================================

/// Processing stage at which a file was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Read,
    Resolve,
    Parse,
    Render,
    Write,
}

/// A file that could not be fully processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// File path as collected.
    pub file: String,
    /// Stage that failed.
    pub stage: FailureStage,
    /// Error message.
    pub message: String,
}

/// File counts for a project or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCounts {
    /// Files visited.
    pub total: usize,
    /// Files rewritten (or that would be, in a dry run).
    pub stripped: usize,
    /// Files with nothing to remove.
    pub unchanged: usize,
    /// Files abandoned at some stage.
    pub failed: usize,
}

impl FileCounts {
    /// Add another set of counts to this one.
    pub fn absorb(&mut self, other: &FileCounts) {
        self.total += other.total;
        self.stripped += other.stripped;
        self.unchanged += other.unchanged;
        self.failed += other.failed;
    }
}

/// Build results for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Project name.
    pub name: String,
    /// Project root directory.
    pub root: String,
    /// File counts.
    pub files: FileCounts,
    /// Docstring records extracted from this project.
    pub symbols: usize,
    /// Files that could not be processed.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<FileFailure>,
}

/// Outcome of acquiring one project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionState {
    /// Freshly cloned.
    Cloned,
    /// Directory already existed; nothing fetched.
    Present,
    /// Clone failed; the project is skipped.
    Failed,
}

/// Acquisition status of one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAcquisition {
    /// Project name.
    pub name: String,
    /// Target directory.
    pub path: String,
    /// What happened.
    pub state: AcquisitionState,
    /// Error message when the clone failed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

// ============================================================================
// Command responses
// ============================================================================

/// Response for `docbench collect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// One entry per configured project.
    pub projects: Vec<ProjectAcquisition>,
}

impl CollectResponse {
    /// Create a collect response.
    pub fn new(projects: Vec<ProjectAcquisition>) -> Self {
        CollectResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            projects,
        }
    }
}

/// Response for `docbench build`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// True if no source file was rewritten.
    pub dry_run: bool,
    /// Where the corpus was written.
    pub corpus: String,
    /// Number of distinct symbols in the corpus.
    pub symbol_count: usize,
    /// Totals across all projects.
    pub files: FileCounts,
    /// Acquisition results, absent when running offline.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub acquisition: Vec<ProjectAcquisition>,
    /// Per-project results.
    pub projects: Vec<ProjectReport>,
}

impl BuildResponse {
    /// Create a build response, computing file totals from the projects.
    pub fn new(
        dry_run: bool,
        corpus: impl Into<String>,
        symbol_count: usize,
        acquisition: Vec<ProjectAcquisition>,
        projects: Vec<ProjectReport>,
    ) -> Self {
        let mut files = FileCounts::default();
        for project in &projects {
            files.absorb(&project.files);
        }
        BuildResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            dry_run,
            corpus: corpus.into(),
            symbol_count,
            files,
            acquisition,
            projects,
        }
    }
}

/// Response for `docbench extract`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Number of files visited.
    pub files: usize,
    /// Extracted qualified name to docstring mapping.
    pub symbols: SymbolMap,
    /// Files that could not be processed.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<FileFailure>,
}

impl ExtractResponse {
    /// Create an extract response.
    pub fn new(files: usize, symbols: SymbolMap, failures: Vec<FileFailure>) -> Self {
        ExtractResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            files,
            symbols,
            failures,
        }
    }
}

/// Response for `docbench compare --format json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Where the match results were written.
    pub output: String,
    /// Aggregate statistics.
    pub statistics: Statistics,
}

impl CompareResponse {
    /// Create a compare response.
    pub fn new(output: impl Into<String>, statistics: Statistics) -> Self {
        CompareResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            output: output.into(),
            statistics,
        }
    }
}

// ============================================================================
// Emission
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}
