//! Python parsing via tree-sitter.
//!
//! The concrete syntax tree is converted into the declaration tree of
//! [`crate::tree`] and then dropped. Any error or missing node makes the whole
//! file a [`ParseError`].

use thiserror::Error;
use tree_sitter::{Node, Parser};

use docbench_core::patch::Span;

use crate::literal;
use crate::tree::{
    ClassDef, CompoundStatement, ExprStatement, FunctionDef, Module, SimpleStatement, Statement,
    Suite,
};

/// Error type for parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load Python grammar: {0}")]
    Language(String),

    /// The parser gave up without producing a tree.
    #[error("parser produced no tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{col} near `{near}`")]
    Syntax { line: u32, col: u32, near: String },
}

/// Result type for parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse Python source into a [`Module`].
pub fn parse_module(source: &str) -> ParseResult<Module> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| ParseError::Language(e.to_string()))?;
    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error(root, source));
    }

    Ok(Module {
        body: Suite {
            statements: convert_statements(root, source),
            span: node_span(root),
        },
    })
}

fn node_span(node: Node) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Locate the first error or missing node in document order.
fn syntax_error(root: Node, source: &str) -> ParseError {
    let node = first_error(root).unwrap_or(root);
    let position = node.start_position();
    let near: String = node_text(node, source)
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(40)
        .collect();
    ParseError::Syntax {
        line: position.row as u32 + 1,
        col: position.column as u32 + 1,
        near,
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Named, non-comment children of `node`.
fn statement_nodes(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn convert_statements(parent: Node, source: &str) -> Vec<Statement> {
    statement_nodes(parent)
        .into_iter()
        .map(|child| convert_statement(child, source))
        .collect()
}

fn convert_statement(node: Node, source: &str) -> Statement {
    match node.kind() {
        "class_definition" | "function_definition" => {
            convert_definition(node, node_span(node), source)
        }
        "decorated_definition" => match node.child_by_field_name("definition") {
            Some(definition) => convert_definition(definition, node_span(node), source),
            None => simple(node),
        },
        "expression_statement" => Statement::Expr(ExprStatement {
            span: node_span(node),
            docstring: docstring_value(node, source),
        }),
        _ => {
            let mut suites = Vec::new();
            collect_suites(node, source, &mut suites);
            if suites.is_empty() {
                simple(node)
            } else {
                Statement::Compound(CompoundStatement {
                    kind: node.kind().to_string(),
                    span: node_span(node),
                    suites,
                })
            }
        }
    }
}

fn simple(node: Node) -> Statement {
    Statement::Simple(SimpleStatement {
        kind: node.kind().to_string(),
        span: node_span(node),
        synthetic: false,
    })
}

/// Convert a class or function node. `span` covers its decorators, if any.
fn convert_definition(node: Node, span: Span, source: &str) -> Statement {
    let name = node
        .child_by_field_name("name")
        .map(|n| node_text(n, source).to_string())
        .unwrap_or_default();
    let body = match node.child_by_field_name("body") {
        Some(block) => convert_block(block, source),
        None => Suite {
            statements: Vec::new(),
            span: Span::new(span.end, span.end),
        },
    };

    if node.kind() == "class_definition" {
        Statement::ClassDef(ClassDef { name, span, body })
    } else {
        let asynchronous = node.child(0).is_some_and(|first| first.kind() == "async");
        Statement::FunctionDef(FunctionDef {
            name,
            asynchronous,
            span,
            body,
        })
    }
}

fn convert_block(block: Node, source: &str) -> Suite {
    Suite {
        statements: convert_statements(block, source),
        span: node_span(block),
    }
}

/// Gather the blocks of a compound statement, looking through its clauses.
fn collect_suites(node: Node, source: &str, suites: &mut Vec<Suite>) {
    for child in statement_nodes(node) {
        if child.kind() == "block" {
            suites.push(convert_block(child, source));
        } else if child.kind().ends_with("_clause") {
            collect_suites(child, source, suites);
        }
    }
}

/// The string value of an expression statement that is a single plain string.
fn docstring_value(statement: Node, source: &str) -> Option<String> {
    match statement_nodes(statement).as_slice() {
        [expression] => string_value(*expression, source),
        _ => None,
    }
}

fn string_value(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "string" => literal::evaluate(node_text(node, source)),
        "concatenated_string" => statement_nodes(node)
            .into_iter()
            .map(|part| string_value(part, source))
            .collect(),
        "parenthesized_expression" => match statement_nodes(node).as_slice() {
            [inner] => string_value(*inner, source),
            _ => None,
        },
        _ => None,
    }
}
