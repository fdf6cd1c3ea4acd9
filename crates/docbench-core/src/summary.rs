//! Parser for symbol-summary documents.
//!
//! A summary document is semi-structured markdown: heading lines name a
//! section, and bullet lines of the form ``- `symbol`: description`` describe
//! one symbol each. Sections may be separated by any number of blank lines and
//! any other text is ignored.
//!
//! ```text
//! ## describe.py
//!
//! - `describe_ndframe`: Generate descriptive statistics.
//! - `refine_percentiles`: Ensure percentiles are unique and sorted.
//! ```
//!
//! Keys are built by [`SummaryKeying`] from an optional prefix, the section
//! stem and the symbol name.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::corpus::SymbolMap;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+?)\s*#*\s*$").expect("valid heading regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s+`([^`]+)`\s*:\s*(.*?)\s*$").expect("valid bullet regex"));

/// How summary entries are turned into qualified names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryKeying {
    /// Namespace prepended to every key (e.g. `pandas.core.methods`).
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Insert the section stem (section name up to its first `.`) between
    /// the prefix and the symbol.
    #[serde(default)]
    pub include_section: bool,
}

impl SummaryKeying {
    /// Build the key for `symbol` found under `section`.
    pub fn key(&self, section: Option<&str>, symbol: &str) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(3);
        if let Some(prefix) = self.key_prefix.as_deref() {
            let prefix = prefix.trim_matches('.');
            if !prefix.is_empty() {
                parts.push(prefix);
            }
        }
        if self.include_section {
            if let Some(stem) = section.and_then(|s| s.split('.').next()) {
                if !stem.is_empty() {
                    parts.push(stem);
                }
            }
        }
        parts.push(symbol);
        parts.join(".")
    }
}

/// A single parsed bullet, before keying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Heading the bullet appeared under, if any.
    pub section: Option<String>,
    /// Symbol name between the backticks.
    pub symbol: String,
    /// Description text after the colon.
    pub description: String,
}

/// Parse every bullet entry of a summary document, in document order.
pub fn parse_entries(content: &str) -> Vec<SummaryEntry> {
    let mut section: Option<String> = None;
    let mut entries = Vec::new();

    for line in content.lines() {
        if let Some(caps) = HEADING.captures(line) {
            section = Some(caps[1].to_string());
            continue;
        }
        if let Some(caps) = BULLET.captures(line) {
            entries.push(SummaryEntry {
                section: section.clone(),
                symbol: caps[1].trim().to_string(),
                description: caps[2].to_string(),
            });
        }
    }

    entries
}

/// Parse a summary document into a keyed symbol map.
///
/// A key that appears twice keeps its first position and the later text.
pub fn parse_summary(content: &str, keying: &SummaryKeying) -> SymbolMap {
    let mut map = SymbolMap::new();
    for entry in parse_entries(content) {
        let key = keying.key(entry.section.as_deref(), &entry.symbol);
        map.insert(key, entry.description);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
# Pandas summary

## describe.py

- `describe_ndframe`: Generate descriptive statistics.
- `refine_percentiles`: Ensure percentiles are unique.


## selectn.py
- `SelectN`: Select the n largest values.
Some trailing prose that is not a bullet.
";

    #[test]
    fn parses_all_sections_without_fixed_count() {
        let entries = parse_entries(DOC);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].section.as_deref(), Some("describe.py"));
        assert_eq!(entries[2].section.as_deref(), Some("selectn.py"));
        assert_eq!(entries[2].description, "Select the n largest values.");
    }

    #[test]
    fn keys_with_prefix_and_section_stem() {
        let keying = SummaryKeying {
            key_prefix: Some("pandas.core.methods".to_string()),
            include_section: true,
        };
        let map = parse_summary(DOC, &keying);
        assert_eq!(
            map.get("pandas.core.methods.describe.describe_ndframe")
                .map(String::as_str),
            Some("Generate descriptive statistics.")
        );
        assert!(map.contains_key("pandas.core.methods.selectn.SelectN"));
    }

    #[test]
    fn keys_without_prefix_use_symbol_only() {
        let map = parse_summary(DOC, &SummaryKeying::default());
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["describe_ndframe", "refine_percentiles", "SelectN"]);
    }

    #[test]
    fn bullets_before_any_heading_have_no_section() {
        let keying = SummaryKeying {
            key_prefix: None,
            include_section: true,
        };
        let map = parse_summary("- `pkg.mod.Foo`: Performs foo operation\n", &keying);
        assert_eq!(
            map.get("pkg.mod.Foo").map(String::as_str),
            Some("Performs foo operation")
        );
    }

    #[test]
    fn duplicate_keys_keep_later_text() {
        let doc = "- `f`: first\n- `g`: other\n- `f`: second\n";
        let map = parse_summary(doc, &SummaryKeying::default());
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("f").map(String::as_str), Some("second"));
    }
}
