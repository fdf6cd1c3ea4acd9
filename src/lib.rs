//! Docbench: a docstring benchmark corpus builder
//!
//! Collects Python projects, extracts every module, class and function
//! docstring into a corpus keyed by qualified name, strips those docstrings
//! from the sources, and scores externally written summaries against the
//! corpus.

// Core infrastructure - re-exported from docbench-core
pub use docbench_core::corpus;
pub use docbench_core::error;
pub use docbench_core::matcher;
pub use docbench_core::output;
pub use docbench_core::patch;
pub use docbench_core::similarity;
pub use docbench_core::stats;
pub use docbench_core::summary;
pub use docbench_core::text;
pub use docbench_core::util;

// Language adapter
pub use docbench_python as python;

// Pipelines
pub mod acquire;
pub mod compare;
pub mod config;
pub mod pipeline;

// Front door
pub mod cli;
