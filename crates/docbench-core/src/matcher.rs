//! Symbol matching between two qualified-name to text mappings.
//!
//! For each source entry, in source order:
//!
//! 1. **Exact**: the same key exists in the target.
//! 2. **Fuzzy**: targets whose leaf segment equals the source leaf are scored
//!    and the best one wins. Equal scores go to the lexicographically smallest
//!    target key.
//! 3. **No match**: the [`NO_MATCH`] sentinel with a score of `0.0`.
//!
//! An exact match is taken even when a fuzzy candidate would score higher.

use serde::{Deserialize, Serialize};

use crate::corpus::SymbolMap;
use crate::similarity::similarity;

/// Sentinel symbol recorded when no target corresponds to a source symbol.
pub const NO_MATCH: &str = "NO_MATCH";

/// Namespace separator in qualified names.
pub const SEPARATOR: char = '.';

/// One correlated pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Symbol from the source (summary) mapping.
    #[serde(rename = "summary_symbol")]
    pub source_symbol: String,
    /// Matched target (docstring) symbol, or [`NO_MATCH`].
    #[serde(rename = "docstring_symbol")]
    pub matched_symbol: String,
    /// Text similarity in `[0, 1]`.
    pub similarity: f64,
    /// Source text.
    #[serde(rename = "summary_description")]
    pub source_text: String,
    /// Matched target text, empty for no match.
    #[serde(rename = "docstring_description")]
    pub matched_text: String,
}

/// How a result was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Fuzzy,
    NoMatch,
}

impl MatchResult {
    /// Classify the result by comparing symbols and checking the sentinel.
    pub fn kind(&self) -> MatchKind {
        if self.matched_symbol == NO_MATCH {
            MatchKind::NoMatch
        } else if self.matched_symbol == self.source_symbol {
            MatchKind::Exact
        } else {
            MatchKind::Fuzzy
        }
    }
}

/// The final segment of a qualified name.
pub fn leaf_name(symbol: &str) -> &str {
    symbol.rsplit(SEPARATOR).next().unwrap_or(symbol)
}

/// Correlate every source entry with the target mapping.
pub fn match_symbols(source: &SymbolMap, target: &SymbolMap) -> Vec<MatchResult> {
    source
        .iter()
        .map(|(key, text)| match_one(key, text, target))
        .collect()
}

fn match_one(key: &str, text: &str, target: &SymbolMap) -> MatchResult {
    if let Some(target_text) = target.get(key) {
        return MatchResult {
            source_symbol: key.to_string(),
            matched_symbol: key.to_string(),
            similarity: similarity(text, target_text),
            source_text: text.to_string(),
            matched_text: target_text.clone(),
        };
    }

    let leaf = leaf_name(key);
    let mut best: Option<(&String, &String, f64)> = None;
    for (candidate, candidate_text) in target {
        if leaf_name(candidate) != leaf {
            continue;
        }
        let score = similarity(text, candidate_text);
        let better = match best {
            None => true,
            Some((best_key, _, best_score)) => {
                score > best_score || (score == best_score && candidate < best_key)
            }
        };
        if better {
            best = Some((candidate, candidate_text, score));
        }
    }

    match best {
        Some((candidate, candidate_text, score)) => MatchResult {
            source_symbol: key.to_string(),
            matched_symbol: candidate.clone(),
            similarity: score,
            source_text: text.to_string(),
            matched_text: candidate_text.clone(),
        },
        None => MatchResult {
            source_symbol: key.to_string(),
            matched_symbol: NO_MATCH.to_string(),
            similarity: 0.0,
            source_text: text.to_string(),
            matched_text: String::new(),
        },
    }
}
