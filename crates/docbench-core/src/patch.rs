//! Byte spans and batch span edits.
//!
//! Documentation removal never re-prints a tree from scratch. Instead the
//! remover describes what it took out as a list of [`EditPrimitive`]s against
//! the original text, and [`BatchSpanEditor`] applies them in one pass:
//!
//! | Primitive | Description |
//! |-----------|-------------|
//! | `Replace(span, text)` | Replace content at span with new text |
//! | `Delete(span)` | Remove content at span |
//!
//! # Example
//!
//! ```
//! use docbench_core::patch::{BatchSpanEditor, EditPrimitive, Span};
//!
//! let source = "def foo():\n    \"\"\"Doc.\"\"\"\n    return 1\n";
//!
//! let mut editor = BatchSpanEditor::new(source);
//! editor.add(EditPrimitive::Delete { span: Span::new(11, 26) });
//!
//! let result = editor.apply().unwrap();
//! assert_eq!(result, "def foo():\n    return 1\n");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Byte offsets into file content.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span overlaps with another.
    ///
    /// Adjacent spans (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// An atomic edit operation on source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPrimitive {
    /// Replace content at span with new text.
    Replace { span: Span, new_text: String },

    /// Delete content at span. Equivalent to `Replace { span, new_text: "" }`.
    Delete { span: Span },
}

impl EditPrimitive {
    /// Returns the span this edit operates on.
    pub fn effective_span(&self) -> Span {
        match self {
            EditPrimitive::Replace { span, .. } => *span,
            EditPrimitive::Delete { span } => *span,
        }
    }

    fn replacement(&self) -> &str {
        match self {
            EditPrimitive::Replace { new_text, .. } => new_text,
            EditPrimitive::Delete { .. } => "",
        }
    }
}

/// Error type for batch edit operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchEditError {
    /// Two edits have overlapping spans.
    #[error("overlapping edits: {edit1_span} and {edit2_span}")]
    OverlappingEdits { edit1_span: Span, edit2_span: Span },

    /// An edit span extends beyond source length.
    #[error("span {span} is out of bounds for source of length {source_len}")]
    SpanOutOfBounds { span: Span, source_len: usize },

    /// An edit boundary falls inside a multi-byte character.
    #[error("span {span} does not fall on character boundaries")]
    NotCharBoundary { span: Span },
}

/// Result type for batch edit operations.
pub type BatchEditResult<T> = Result<T, BatchEditError>;

/// Collects edit primitives and applies them atomically.
///
/// Either every edit is applied or, on a validation error, none is.
pub struct BatchSpanEditor<'src> {
    source: &'src str,
    edits: Vec<EditPrimitive>,
}

impl<'src> BatchSpanEditor<'src> {
    /// Create a new BatchSpanEditor for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// Add an edit primitive to the batch.
    pub fn add(&mut self, edit: EditPrimitive) {
        self.edits.push(edit);
    }

    /// Add multiple edit primitives.
    pub fn add_all(&mut self, edits: impl IntoIterator<Item = EditPrimitive>) {
        self.edits.extend(edits);
    }

    /// Returns the number of edits currently queued.
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns true if no edits are queued.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply all queued edits and return the transformed source.
    ///
    /// Edits are applied in reverse position order so earlier spans stay
    /// valid. An empty batch returns the source unchanged.
    ///
    /// # Errors
    ///
    /// - `BatchEditError::SpanOutOfBounds` if any span exceeds source length
    /// - `BatchEditError::NotCharBoundary` if a span splits a character
    /// - `BatchEditError::OverlappingEdits` if any two edits overlap
    pub fn apply(mut self) -> BatchEditResult<String> {
        let source_len = self.source.len();

        for edit in &self.edits {
            let span = edit.effective_span();
            if span.end > source_len {
                return Err(BatchEditError::SpanOutOfBounds { span, source_len });
            }
            if !self.source.is_char_boundary(span.start) || !self.source.is_char_boundary(span.end)
            {
                return Err(BatchEditError::NotCharBoundary { span });
            }
        }

        self.edits
            .sort_by(|a, b| b.effective_span().start.cmp(&a.effective_span().start));

        for pair in self.edits.windows(2) {
            let prev = pair[0].effective_span();
            let curr = pair[1].effective_span();
            if curr.overlaps(&prev) {
                return Err(BatchEditError::OverlappingEdits {
                    edit1_span: curr,
                    edit2_span: prev,
                });
            }
        }

        let mut result = self.source.to_string();
        for edit in &self.edits {
            let span = edit.effective_span();
            result.replace_range(span.start..span.end, edit.replacement());
        }
        Ok(result)
    }
}
