//! Docstring removal.
//!
//! The structural dual of [`crate::extract`]: every module, class, function
//! and async function body loses its leading docstring statement. Besides the
//! rewritten tree, the remover emits the span edits that make the same change
//! to the original source text, for a [`crate::render::Renderer`] to apply.
//!
//! A declaration body may not be empty, so a docstring that is the only
//! statement of a class or function becomes `pass`. The same happens when the
//! statement after the docstring is itself a bare string: deleting the
//! docstring would promote that string to docstring, and a second strip would
//! remove it as well.

use docbench_core::patch::{EditPrimitive, Span};
use docbench_core::text::{is_blank, line_end_inclusive, line_start};

use crate::tree::{ClassDef, FunctionDef, Module, SimpleStatement, Statement, Suite};
use crate::visitor::{transform_module, Transformer};

const PLACEHOLDER: &str = "pass";

/// Output of [`strip_docstrings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripResult {
    /// The tree without docstrings.
    pub module: Module,
    /// Edits against the original source that perform the same removal.
    pub edits: Vec<EditPrimitive>,
    /// Number of docstrings removed.
    pub removed: usize,
}

impl StripResult {
    /// True if nothing was removed.
    pub fn is_unchanged(&self) -> bool {
        self.removed == 0
    }
}

/// Removes leading docstrings during a [`transform_module`].
pub struct DocstringRemover<'s> {
    source: &'s str,
    edits: Vec<EditPrimitive>,
    removed: usize,
}

impl<'s> DocstringRemover<'s> {
    pub fn new(source: &'s str) -> Self {
        DocstringRemover {
            source,
            edits: Vec::new(),
            removed: 0,
        }
    }

    fn strip_suite(&mut self, suite: &mut Suite, requires_statement: bool) {
        let Some(doc) = suite
            .statements
            .first()
            .filter(|first| first.docstring().is_some())
            .map(Statement::span)
        else {
            return;
        };

        let next = suite.statements.get(1);
        let needs_placeholder = match next {
            None => requires_statement,
            Some(statement) => statement.docstring().is_some(),
        };

        if needs_placeholder {
            self.edits.push(EditPrimitive::Replace {
                span: doc,
                new_text: PLACEHOLDER.to_string(),
            });
            suite.statements[0] = Statement::Simple(SimpleStatement::placeholder(doc));
        } else {
            let span = match next.map(Statement::span) {
                Some(following) if self.same_logical_line(doc.end, following.start) => {
                    Span::new(doc.start, following.start)
                }
                _ => self.line_span(doc),
            };
            self.edits.push(EditPrimitive::Delete { span });
            suite.statements.remove(0);
        }
        self.removed += 1;
    }

    /// True if no line break between `from` and `to` ends a logical line,
    /// i.e. every `\n` follows a backslash continuation.
    fn same_logical_line(&self, from: usize, to: usize) -> bool {
        self.source.get(from..to).is_some_and(|between| {
            between
                .match_indices('\n')
                .all(|(i, _)| between[..i].trim_end_matches('\r').ends_with('\\'))
        })
    }

    /// The docstring's physical lines, including the final newline. Text
    /// before the docstring on its first line is kept unless it is blank.
    fn line_span(&self, doc: Span) -> Span {
        let first_line = line_start(self.source, doc.start);
        let start = match self.source.get(first_line..doc.start) {
            Some(prefix) if is_blank(prefix) => first_line,
            _ => doc.start,
        };
        Span::new(start, line_end_inclusive(self.source, doc.end))
    }
}

impl Transformer for DocstringRemover<'_> {
    fn transform_module(&mut self, mut node: Module) -> Module {
        self.strip_suite(&mut node.body, false);
        node
    }

    fn transform_class_def(&mut self, mut node: ClassDef) -> ClassDef {
        self.strip_suite(&mut node.body, true);
        node
    }

    fn transform_function_def(&mut self, mut node: FunctionDef) -> FunctionDef {
        self.strip_suite(&mut node.body, true);
        node
    }

    fn transform_async_function_def(&mut self, mut node: FunctionDef) -> FunctionDef {
        self.strip_suite(&mut node.body, true);
        node
    }
}

/// Remove every leading docstring from `module`, parsed from `source`.
pub fn strip_docstrings(module: Module, source: &str) -> StripResult {
    let mut remover = DocstringRemover::new(source);
    let module = transform_module(&mut remover, module);
    StripResult {
        module,
        edits: remover.edits,
        removed: remover.removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_module;
    use docbench_core::patch::BatchSpanEditor;

    fn strip(source: &str) -> (String, StripResult) {
        let module = parse_module(source).unwrap();
        let result = strip_docstrings(module, source);
        let mut editor = BatchSpanEditor::new(source);
        editor.add_all(result.edits.iter().cloned());
        (editor.apply().unwrap(), result)
    }

    #[test]
    fn removes_docstring_lines() {
        let source = "\
\"\"\"Module.\"\"\"
import os


class C:
    \"\"\"Class.

    More text.
    \"\"\"

    def f(self):  # keep this comment
        'Method.'
        return os.sep
";
        let (output, result) = strip(source);
        assert_eq!(result.removed, 3);
        assert_eq!(
            output,
            "\
import os


class C:

    def f(self):  # keep this comment
        return os.sep
"
        );
    }

    #[test]
    fn sole_statement_becomes_pass() {
        let (output, result) = strip("def f():\n    'doc'\n\nclass K: 'doc'\n");
        assert_eq!(output, "def f():\n    pass\n\nclass K: pass\n");
        let Statement::FunctionDef(f) = &result.module.body.statements[0] else {
            panic!("expected function");
        };
        let Statement::Simple(placeholder) = &f.body.statements[0] else {
            panic!("expected placeholder");
        };
        assert!(placeholder.synthetic);
    }

    #[test]
    fn module_with_only_a_docstring_becomes_empty() {
        let (output, result) = strip("'''Only a docstring.'''\n");
        assert_eq!(output, "");
        assert!(result.module.body.statements.is_empty());
    }

    #[test]
    fn same_line_statement_is_kept() {
        let (output, _) = strip("def f():\n    'doc'; return 1\n");
        assert_eq!(output, "def f():\n    return 1\n");
    }

    #[test]
    fn continued_line_statement_is_kept() {
        let source = "def f():\n    'doc' \\\n        ; x = 1\n";
        let (output, result) = strip(source);
        assert_eq!(result.removed, 1);
        assert_eq!(output, "def f():\n    x = 1\n");
        assert!(parse_module(&output).is_ok());
    }

    #[test]
    fn future_import_stays_first_after_module_docstring() {
        let source = "\"\"\"Module.\"\"\"\nfrom __future__ import annotations\nimport os\n";
        let (output, result) = strip(source);
        assert_eq!(result.removed, 1);
        assert_eq!(output, "from __future__ import annotations\nimport os\n");
    }

    #[test]
    fn following_string_statement_is_protected() {
        let (output, _) = strip("def f():\n    'doc'\n    'second'\n    return 1\n");
        assert_eq!(output, "def f():\n    pass\n    'second'\n    return 1\n");
        let (again, result) = strip(&output);
        assert_eq!(again, output);
        assert!(result.is_unchanged());
    }

    #[test]
    fn undocumented_declarations_are_untouched() {
        let source = "def f(x):\n    x = 'not doc'\n    return x\n";
        let (output, result) = strip(source);
        assert!(result.is_unchanged());
        assert!(result.edits.is_empty());
        assert_eq!(output, source);
    }

    #[test]
    fn nested_declarations_are_stripped() {
        let source = "\
if True:
    def a():
        'A'
        return 1
def outer():
    'Outer.'
    async def inner():
        'Inner.'
        await x
    return inner
";
        let (output, result) = strip(source);
        assert_eq!(result.removed, 3);
        assert_eq!(
            output,
            "\
if True:
    def a():
        return 1
def outer():
    async def inner():
        await x
    return inner
"
        );
    }
}
