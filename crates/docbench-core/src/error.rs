//! Error types and error code constants for docbench.
//!
//! `DocbenchError` is the single error type rendered by the CLI. Layer errors
//! (corpus persistence here, parsing and rendering in the language crates)
//! are bridged into it with `From` impls.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad flags, bad configuration)
//! - `3`: Input errors (missing or unreadable input, malformed input data)
//! - `4`: Output errors (failed to write a final artifact)
//! - `10`: Internal errors (bugs, unexpected state)

use std::fmt;
use std::io;

use thiserror::Error;

use crate::corpus::CorpusError;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output and process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad flags, bad config).
    InvalidArguments = 2,
    /// Input not found, unreadable or malformed.
    InputError = 3,
    /// A final artifact could not be written.
    OutputError = 4,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum DocbenchError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Configuration file could not be loaded.
    #[error("invalid configuration {path}: {message}")]
    Config { path: String, message: String },

    /// File or directory not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// Input exists but could not be used.
    #[error("invalid input {path}: {message}")]
    InvalidInput { path: String, message: String },

    /// Source text did not parse.
    #[error("parse error in {file} at {line}:{col}: {message}")]
    Parse {
        file: String,
        line: u32,
        col: u32,
        message: String,
    },

    /// A final output artifact could not be written.
    #[error("failed to write {path}: {message}")]
    OutputWrite { path: String, message: String },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&DocbenchError> for OutputErrorCode {
    fn from(err: &DocbenchError) -> Self {
        match err {
            DocbenchError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            DocbenchError::Config { .. } => OutputErrorCode::InvalidArguments,
            DocbenchError::FileNotFound { .. } => OutputErrorCode::InputError,
            DocbenchError::InvalidInput { .. } => OutputErrorCode::InputError,
            DocbenchError::Parse { .. } => OutputErrorCode::InputError,
            DocbenchError::OutputWrite { .. } => OutputErrorCode::OutputError,
            DocbenchError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<DocbenchError> for OutputErrorCode {
    fn from(err: DocbenchError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Bridge: CorpusError -> DocbenchError
// ============================================================================

impl From<CorpusError> for DocbenchError {
    fn from(err: CorpusError) -> Self {
        match err {
            CorpusError::Read { path, source } if source.kind() == io::ErrorKind::NotFound => {
                DocbenchError::FileNotFound { path }
            }
            CorpusError::Read { path, source } => DocbenchError::InvalidInput {
                path,
                message: source.to_string(),
            },
            CorpusError::Write { path, source } => DocbenchError::OutputWrite {
                path,
                message: source.to_string(),
            },
            CorpusError::Json { path, source } => DocbenchError::InvalidInput {
                path,
                message: source.to_string(),
            },
        }
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl DocbenchError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        DocbenchError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        DocbenchError::FileNotFound { path: path.into() }
    }

    /// Create an output write error.
    pub fn output_write(path: impl Into<String>, message: impl fmt::Display) -> Self {
        DocbenchError::OutputWrite {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        DocbenchError::InternalError {
            message: message.into(),
        }
    }

    /// The stable error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(OutputErrorCode::InvalidArguments.code(), 2);
        assert_eq!(OutputErrorCode::InputError.code(), 3);
        assert_eq!(OutputErrorCode::OutputError.code(), 4);
        assert_eq!(OutputErrorCode::InternalError.code(), 10);
    }

    #[test]
    fn variants_map_to_codes() {
        assert_eq!(
            DocbenchError::invalid_args("x").error_code(),
            OutputErrorCode::InvalidArguments
        );
        assert_eq!(
            DocbenchError::file_not_found("a.json").error_code(),
            OutputErrorCode::InputError
        );
        assert_eq!(
            DocbenchError::output_write("out.json", "disk full").error_code(),
            OutputErrorCode::OutputError
        );
    }

    #[test]
    fn corpus_not_found_bridges_to_input_error() {
        let err = CorpusError::Read {
            path: "corpus.json".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let bridged = DocbenchError::from(err);
        assert!(matches!(bridged, DocbenchError::FileNotFound { ref path } if path == "corpus.json"));
    }

    #[test]
    fn corpus_unreadable_bridges_to_invalid_input() {
        let err = CorpusError::Read {
            path: "corpus.json".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let bridged = DocbenchError::from(err);
        assert!(matches!(bridged, DocbenchError::InvalidInput { ref path, .. } if path == "corpus.json"));
        assert_eq!(bridged.error_code(), OutputErrorCode::InputError);
    }

    #[test]
    fn corpus_write_failure_bridges_to_output_error() {
        let err = CorpusError::Write {
            path: "out/corpus.json".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            DocbenchError::from(err).error_code(),
            OutputErrorCode::OutputError
        );
    }

    #[test]
    fn display_includes_context() {
        let err = DocbenchError::Parse {
            file: "a/b.py".to_string(),
            line: 3,
            col: 5,
            message: "unexpected token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "parse error in a/b.py at 3:5: unexpected token"
        );
    }
}
