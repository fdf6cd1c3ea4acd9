//! Docstring extraction.
//!
//! Records the docstring of every module, class, function and async function
//! keyed by qualified name. Extraction never modifies the tree and always
//! descends into nested declarations, documented or not.
//!
//! When one file defines the same qualified name twice (for example a function
//! redefined in both branches of an `if`), the later definition in source
//! order overwrites the earlier one.

use docbench_core::corpus::SymbolMap;

use crate::qualname::QualifiedNameResolver;
use crate::tree::{ClassDef, FunctionDef, Module, Suite};
use crate::visitor::{walk_module, Visitor};

/// Collects docstrings during a [`walk_module`].
pub struct DocstringExtractor<'r> {
    names: &'r QualifiedNameResolver,
    scope: Vec<String>,
    symbols: SymbolMap,
}

impl<'r> DocstringExtractor<'r> {
    pub fn new(names: &'r QualifiedNameResolver) -> Self {
        DocstringExtractor {
            names,
            scope: Vec::new(),
            symbols: SymbolMap::new(),
        }
    }

    /// Consume the extractor, returning what it collected.
    pub fn into_symbols(self) -> SymbolMap {
        self.symbols
    }

    fn record(&mut self, body: &Suite) {
        if let Some(docstring) = body.docstring() {
            let name = self.names.qualify(self.scope.as_slice());
            self.symbols.insert(name, docstring.to_string());
        }
    }

    fn enter(&mut self, name: &str, body: &Suite) {
        self.scope.push(name.to_string());
        self.record(body);
    }
}

impl Visitor for DocstringExtractor<'_> {
    fn visit_module(&mut self, node: &Module) {
        self.record(&node.body);
    }

    fn visit_class_def(&mut self, node: &ClassDef) {
        self.enter(&node.name, &node.body)
    }

    fn leave_class_def(&mut self, _node: &ClassDef) {
        self.scope.pop();
    }

    fn visit_function_def(&mut self, node: &FunctionDef) {
        self.enter(&node.name, &node.body)
    }

    fn leave_function_def(&mut self, _node: &FunctionDef) {
        self.scope.pop();
    }

    fn visit_async_function_def(&mut self, node: &FunctionDef) {
        self.enter(&node.name, &node.body)
    }

    fn leave_async_function_def(&mut self, _node: &FunctionDef) {
        self.scope.pop();
    }
}

/// Extract every docstring in `module`, in pre-order.
pub fn extract_docstrings(module: &Module, names: &QualifiedNameResolver) -> SymbolMap {
    let mut extractor = DocstringExtractor::new(names);
    walk_module(&mut extractor, module);
    extractor.into_symbols()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_module;

    fn extract(source: &str, module: &str) -> SymbolMap {
        let tree = parse_module(source).unwrap();
        extract_docstrings(&tree, &QualifiedNameResolver::for_module(module))
    }

    #[test]
    fn class_with_docstring_and_undocumented_method() {
        let symbols = extract("class C:\n    \"hi\"\n    def f(self):\n        return 1\n", "a.b");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols.get("a.b.C").map(String::as_str), Some("hi"));
        assert!(!symbols.contains_key("a.b.C.f"));
    }

    #[test]
    fn nested_names_follow_lexical_scope() {
        let source = "\
'''Module.'''
class Outer:
    class Inner:
        def method(self):
            'Method.'
async def coroutine():
    'Coroutine.'
def outer():
    def inner():
        'Inner.'
";
        let symbols = extract(source, "pkg.mod");
        let keys: Vec<&str> = symbols.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "pkg.mod",
                "pkg.mod.Outer.Inner.method",
                "pkg.mod.coroutine",
                "pkg.mod.outer.inner",
            ]
        );
        assert_eq!(symbols["pkg.mod.coroutine"], "Coroutine.");
    }

    #[test]
    fn docstring_must_be_first_statement() {
        let symbols = extract("def f():\n    x = 1\n    'not a docstring'\n", "m");
        assert!(symbols.is_empty());
    }

    #[test]
    fn redefinition_keeps_later_docstring() {
        let source = "\
if flag:
    def f():
        'first'
else:
    def f():
        'second'
";
        let symbols = extract(source, "m");
        assert_eq!(symbols.len(), 1);
        assert_eq!(symbols["m.f"], "second");
    }

    #[test]
    fn extraction_does_not_modify_tree() {
        let tree = parse_module("def f():\n    'doc'\n").unwrap();
        let before = tree.clone();
        extract_docstrings(&tree, &QualifiedNameResolver::for_module("m"));
        assert_eq!(tree, before);
    }
}
