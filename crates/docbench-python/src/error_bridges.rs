//! Error bridge implementations for Python-specific errors.
//!
//! `impl From<X> for DocbenchError` conversions live here rather than in
//! `docbench-core` because they depend on types core does not know about.

use docbench_core::error::DocbenchError;

use crate::files::FileError;
use crate::parser::ParseError;
use crate::qualname::ResolveError;
use crate::render::RenderError;

// ============================================================================
// Bridge: FileError -> DocbenchError
// ============================================================================

impl From<FileError> for DocbenchError {
    fn from(err: FileError) -> Self {
        match err {
            FileError::NotFound { path } => DocbenchError::FileNotFound { path },
            FileError::Io(io_err) => DocbenchError::InternalError {
                message: format!("IO error: {}", io_err),
            },
        }
    }
}

// ============================================================================
// Bridge: ParseError -> DocbenchError
// ============================================================================

impl From<ParseError> for DocbenchError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Syntax { line, col, near } => DocbenchError::Parse {
                file: String::new(),
                line,
                col,
                message: format!("syntax error near `{}`", near),
            },
            other => DocbenchError::InternalError {
                message: other.to_string(),
            },
        }
    }
}

// ============================================================================
// Bridge: ResolveError -> DocbenchError
// ============================================================================

impl From<ResolveError> for DocbenchError {
    fn from(err: ResolveError) -> Self {
        DocbenchError::InvalidArguments {
            message: err.to_string(),
        }
    }
}

// ============================================================================
// Bridge: RenderError -> DocbenchError
// ============================================================================

impl From<RenderError> for DocbenchError {
    fn from(err: RenderError) -> Self {
        DocbenchError::InternalError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbench_core::error::OutputErrorCode;

    #[test]
    fn missing_file_is_input_error() {
        let err = DocbenchError::from(FileError::NotFound {
            path: "src".to_string(),
        });
        assert_eq!(err.error_code(), OutputErrorCode::InputError);
    }

    #[test]
    fn syntax_error_keeps_position() {
        let err = DocbenchError::from(ParseError::Syntax {
            line: 4,
            col: 2,
            near: "(:".to_string(),
        });
        assert!(matches!(err, DocbenchError::Parse { line: 4, col: 2, .. }));
    }

    #[test]
    fn resolve_error_is_invalid_arguments() {
        let err = DocbenchError::from(ResolveError::NoComponents {
            file: "x".to_string(),
        });
        assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
    }
}
