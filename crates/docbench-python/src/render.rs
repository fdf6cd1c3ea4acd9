//! Rendering stripped trees back to source text.
//!
//! [`SpliceRenderer`] does not pretty-print: it splices the remover's edits
//! into the original text, so comments and formatting outside the removed
//! docstrings survive unchanged. The result is parsed again before it is
//! returned.
//!
//! The check uses the tree-sitter grammar, which is more permissive than
//! CPython's compiler. Rules enforced after parsing are not checked: a
//! Python 2 `print 'x'` statement parses, and so does a `from __future__`
//! import that is not at the top of the file. Removal never moves a
//! statement ahead of a `__future__` import, so such files were already
//! rejected by CPython before they were stripped.

use thiserror::Error;

use docbench_core::patch::{BatchEditError, BatchSpanEditor, EditPrimitive};

use crate::parser::{parse_module, ParseError};

/// Error type for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The edits could not be applied to the source.
    #[error("failed to apply edits: {0}")]
    Edit(#[from] BatchEditError),

    /// The rendered text is not valid Python.
    #[error("rendered source does not parse: {0}")]
    Reparse(ParseError),
}

/// Produces new source text from an original and the edits made to its tree.
pub trait Renderer {
    fn render(&self, source: &str, edits: &[EditPrimitive]) -> Result<String, RenderError>;
}

/// Applies span edits to the original text and verifies the result parses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpliceRenderer;

impl Renderer for SpliceRenderer {
    fn render(&self, source: &str, edits: &[EditPrimitive]) -> Result<String, RenderError> {
        if edits.is_empty() {
            return Ok(source.to_string());
        }
        let mut editor = BatchSpanEditor::new(source);
        editor.add_all(edits.iter().cloned());
        let rendered = editor.apply()?;
        parse_module(&rendered).map_err(RenderError::Reparse)?;
        Ok(rendered)
    }
}
