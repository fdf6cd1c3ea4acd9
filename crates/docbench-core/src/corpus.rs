//! The symbol corpus: qualified name to documentation text.
//!
//! A corpus is accumulated by merging per-file records in processing order.
//! Later merges overwrite earlier ones with the same key, and the first
//! insertion position of a key is kept, so the persisted JSON lists symbols in
//! the order they were first seen.

use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::write_atomic;

/// Ordered mapping from qualified name to text.
///
/// Used both for extracted docstrings and for parsed summary documents.
pub type SymbolMap = IndexMap<String, String>;

/// Error type for corpus persistence.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("failed to read corpus {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The corpus file could not be written.
    #[error("failed to write corpus {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The corpus file is not a JSON object of strings.
    #[error("invalid corpus JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Run-wide accumulation of docstring records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolCorpus {
    symbols: SymbolMap,
}

impl SymbolCorpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge records into the corpus. Existing keys are overwritten.
    pub fn merge(&mut self, records: impl IntoIterator<Item = (String, String)>) {
        for (name, text) in records {
            self.symbols.insert(name, text);
        }
    }

    /// Number of symbols in the corpus.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if the corpus holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Look up a symbol's text.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }

    /// Borrow the underlying map.
    pub fn symbols(&self) -> &SymbolMap {
        &self.symbols
    }

    /// Consume the corpus, returning the underlying map.
    pub fn into_symbols(self) -> SymbolMap {
        self.symbols
    }

    /// Keep only symbols whose name contains `needle`.
    pub fn filtered(&self, needle: &str) -> SymbolMap {
        self.symbols
            .iter()
            .filter(|(name, _)| name.contains(needle))
            .map(|(name, text)| (name.clone(), text.clone()))
            .collect()
    }

    /// Load a corpus from a JSON object file, preserving key order.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CorpusError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Save the corpus as pretty-printed UTF-8 JSON, atomically.
    pub fn save(&self, path: &Path) -> Result<(), CorpusError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| CorpusError::Write {
            path: path.display().to_string(),
            source: source.into(),
        })?;
        write_atomic(path, json.as_bytes()).map_err(|source| CorpusError::Write {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!("saved {} symbols to {}", self.len(), path.display());
        Ok(())
    }
}

impl FromIterator<(String, String)> for SymbolCorpus {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut corpus = SymbolCorpus::new();
        corpus.merge(iter);
        corpus
    }
}
