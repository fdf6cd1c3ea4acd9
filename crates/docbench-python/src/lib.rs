//! Python language support for docbench.
//!
//! This crate provides Python-specific docstring handling:
//! - Parsing via tree-sitter into a declaration tree
//! - String literal evaluation
//! - Qualified-name resolution from file paths and lexical nesting
//! - Visitor and transformer traits over the tree
//! - Docstring extraction and removal
//! - Rendering stripped sources back to text
//! - File collection and per-file processing

pub mod extract;
pub mod files;
pub mod literal;
pub mod parser;
pub mod process;
pub mod qualname;
pub mod render;
pub mod strip;
pub mod tree;
pub mod visitor;

mod error_bridges;
