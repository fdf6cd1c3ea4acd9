//! Core infrastructure for docbench.
//!
//! This crate provides language-agnostic infrastructure:
//! - Byte spans and batch span edits
//! - Error types and error codes
//! - JSON output types for CLI responses
//! - The persisted symbol corpus and the summary-document parser
//! - TF-IDF similarity, the symbol matcher and match statistics
//! - Text position helpers and atomic file writes

pub mod corpus;
pub mod error;
pub mod matcher;
pub mod output;
pub mod patch;
pub mod similarity;
pub mod stats;
pub mod summary;
pub mod text;
pub mod util;
