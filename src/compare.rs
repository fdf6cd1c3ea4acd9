//! Summary comparison: correlate a summary document with the corpus.
//!
//! The summary mapping is the source and the corpus is the target of
//! [`match_symbols`]. The full result list is written as JSON and the
//! aggregate statistics are reported.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::corpus::{SymbolCorpus, SymbolMap};
use crate::error::DocbenchError;
use crate::matcher::{match_symbols, MatchResult};
use crate::stats::{summarize, Statistics};
use crate::summary::{parse_summary, SummaryKeying};
use crate::util::write_atomic;

/// Resolved inputs of one compare run.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub corpus: PathBuf,
    pub summary: PathBuf,
    pub output: PathBuf,
    /// Only corpus symbols containing this substring are matched.
    pub corpus_filter: Option<String>,
    pub keying: SummaryKeying,
    pub top_k: usize,
}

/// Results of one compare run.
#[derive(Debug, Clone)]
pub struct CompareOutcome {
    pub summary_symbols: usize,
    pub corpus_symbols: usize,
    pub results: Vec<MatchResult>,
    pub statistics: Statistics,
}

/// Load both inputs, match, write the results and aggregate them.
pub fn compare_summary(options: &CompareOptions) -> Result<CompareOutcome, DocbenchError> {
    let corpus = SymbolCorpus::load(&options.corpus)?;
    let target: SymbolMap = match &options.corpus_filter {
        Some(needle) => corpus.filtered(needle),
        None => corpus.into_symbols(),
    };

    let content = read_input(&options.summary)?;
    let source = parse_summary(&content, &options.keying);
    tracing::info!(
        "loaded {} summary symbols and {} corpus symbols",
        source.len(),
        target.len()
    );

    let results = match_symbols(&source, &target);
    write_results(&options.output, &results)?;
    let statistics = summarize(&results, options.top_k);

    Ok(CompareOutcome {
        summary_symbols: source.len(),
        corpus_symbols: target.len(),
        results,
        statistics,
    })
}

fn read_input(path: &Path) -> Result<String, DocbenchError> {
    fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => DocbenchError::file_not_found(path.display().to_string()),
        _ => DocbenchError::InvalidInput {
            path: path.display().to_string(),
            message: err.to_string(),
        },
    })
}

/// Write the match results as a pretty-printed JSON array.
pub fn write_results(path: &Path, results: &[MatchResult]) -> Result<(), DocbenchError> {
    let json = serde_json::to_string_pretty(results)
        .map_err(|e| DocbenchError::internal(e.to_string()))?;
    write_atomic(path, json.as_bytes())
        .map_err(|e| DocbenchError::output_write(path.display().to_string(), e))?;
    tracing::info!("wrote {} results to {}", results.len(), path.display());
    Ok(())
}

/// Per-symbol listing of every match result, in summary order.
pub fn render_details(results: &[MatchResult]) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Symbol Similarity Results:");
    let _ = writeln!(text, "{}", "=".repeat(50));
    for result in results {
        let _ = writeln!(text, "Summary Symbol: {}", result.source_symbol);
        let _ = writeln!(text, "Docstring Symbol: {}", result.matched_symbol);
        let _ = writeln!(text, "Similarity: {:.4}", result.similarity);
        let _ = writeln!(text, "Summary Description: {}", result.source_text);
        let _ = writeln!(text, "Docstring Description: {}", result.matched_text);
        let _ = writeln!(text, "{}", "-".repeat(30));
    }
    let _ = writeln!(text);
    text
}

/// Human-readable statistics report.
pub fn render_report(outcome: &CompareOutcome, output: &Path) -> String {
    let stats = &outcome.statistics;
    let mut text = String::new();
    let _ = writeln!(
        text,
        "Loaded {} symbols from summary, {} symbols from corpus",
        outcome.summary_symbols, outcome.corpus_symbols
    );
    let _ = writeln!(text);
    let _ = writeln!(text, "Analysis Summary:");
    let _ = writeln!(text, "{}", "=".repeat(50));
    let _ = writeln!(text, "Total symbols compared: {}", stats.total);
    let _ = writeln!(text, "Exact matches: {}", stats.exact_matches);
    let _ = writeln!(text, "Fuzzy matches: {}", stats.fuzzy_matches);
    let _ = writeln!(text, "No matches: {}", stats.no_matches);

    let Some(scores) = &stats.scores else {
        let _ = writeln!(text, "No valid similarities found.");
        let _ = writeln!(text);
        let _ = writeln!(text, "Results saved to {}", output.display());
        return text;
    };
    let _ = writeln!(text, "Mean similarity: {:.4}", scores.mean);
    let _ = writeln!(text, "Median similarity: {:.4}", scores.median);
    let _ = writeln!(text, "Max similarity: {:.4}", scores.max);
    let _ = writeln!(text, "Min similarity: {:.4}", scores.min);

    let _ = writeln!(text);
    let _ = writeln!(text, "Top {} most similar pairs:", stats.top.len());
    let _ = writeln!(text, "{}", "-".repeat(30));
    for (rank, result) in stats.top.iter().enumerate() {
        let _ = writeln!(text, "{}. {}", rank + 1, result.source_symbol);
        let _ = writeln!(text, "   {}", result.matched_symbol);
        let _ = writeln!(text, "   Similarity: {:.4}", result.similarity);
        let _ = writeln!(text, "   Summary: {}", result.source_text);
        let _ = writeln!(text, "   Docstring: {}", result.matched_text);
        let _ = writeln!(text);
    }
    let _ = writeln!(text, "Results saved to {}", output.display());
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::NO_MATCH;
    use tempfile::TempDir;

    fn options(dir: &Path, corpus: &str, summary: &str) -> CompareOptions {
        let corpus_path = dir.join("corpus.json");
        let summary_path = dir.join("summary.md");
        fs::write(&corpus_path, corpus).unwrap();
        fs::write(&summary_path, summary).unwrap();
        CompareOptions {
            corpus: corpus_path,
            summary: summary_path,
            output: dir.join("result").join("matches.json"),
            corpus_filter: None,
            keying: SummaryKeying::default(),
            top_k: 5,
        }
    }

    #[test]
    fn exact_fuzzy_and_missing_symbols() {
        let dir = TempDir::new().unwrap();
        let corpus = r#"{
  "pkg.mod.Foo": "Parse configuration files.",
  "other.helpers.load": "Load data from disk."
}"#;
        let summary = "\
## mod.py

- `pkg.mod.Foo`: Parse configuration files.
- `tools.load`: Load data from disk quickly.
- `ghost`: Does not exist anywhere.
";
        let outcome = compare_summary(&options(dir.path(), corpus, summary)).unwrap();

        assert_eq!(outcome.results.len(), 3);
        assert_eq!(outcome.results[0].matched_symbol, "pkg.mod.Foo");
        assert_eq!(outcome.results[0].similarity, 1.0);
        assert_eq!(outcome.results[1].matched_symbol, "other.helpers.load");
        assert_eq!(outcome.results[2].matched_symbol, NO_MATCH);
        assert_eq!(outcome.statistics.exact_matches, 1);
        assert_eq!(outcome.statistics.fuzzy_matches, 1);
        assert_eq!(outcome.statistics.no_matches, 1);

        let written = fs::read_to_string(dir.path().join("result").join("matches.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed[0]["summary_symbol"], "pkg.mod.Foo");
        assert_eq!(parsed[2]["docstring_symbol"], NO_MATCH);
    }

    #[test]
    fn corpus_filter_restricts_targets() {
        let dir = TempDir::new().unwrap();
        let corpus = r#"{"a.x.run": "Run.", "b.x.run": "Run."}"#;
        let mut opts = options(dir.path(), corpus, "- `run`: Run.\n");
        opts.corpus_filter = Some("b.".to_string());

        let outcome = compare_summary(&opts).unwrap();
        assert_eq!(outcome.corpus_symbols, 1);
        assert_eq!(outcome.results[0].matched_symbol, "b.x.run");
    }

    #[test]
    fn missing_summary_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(dir.path(), "{}", "");
        opts.summary = dir.path().join("absent.md");
        assert!(matches!(
            compare_summary(&opts),
            Err(DocbenchError::FileNotFound { .. })
        ));
    }

    #[test]
    fn malformed_corpus_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let opts = options(dir.path(), "[1, 2]", "- `a`: b\n");
        assert!(matches!(
            compare_summary(&opts),
            Err(DocbenchError::InvalidInput { .. })
        ));
    }

    #[test]
    fn report_without_positive_scores() {
        let dir = TempDir::new().unwrap();
        let opts = options(dir.path(), "{}", "- `a`: something\n");
        let outcome = compare_summary(&opts).unwrap();
        let report = render_report(&outcome, &opts.output);
        assert!(report.contains("No matches: 1"));
        assert!(report.contains("No valid similarities found."));
        assert!(!report.contains("Mean similarity"));
    }

    #[test]
    fn details_list_every_result() {
        let dir = TempDir::new().unwrap();
        let opts = options(
            dir.path(),
            r#"{"m.f": "Read a file."}"#,
            "- `m.f`: Read a file.\n- `ghost`: Nothing.\n",
        );
        let outcome = compare_summary(&opts).unwrap();
        let details = render_details(&outcome.results);
        assert!(details.starts_with("Symbol Similarity Results:"));
        assert!(details.contains("Summary Symbol: m.f\nDocstring Symbol: m.f\nSimilarity: 1.0000"));
        assert!(details.contains("Summary Symbol: ghost\nDocstring Symbol: NO_MATCH"));
        assert_eq!(details.matches("Summary Symbol:").count(), 2);
    }

    #[test]
    fn unreadable_corpus_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(dir.path(), "{}", "- `a`: b\n");
        // A directory exists but cannot be read as a file
        opts.corpus = dir.path().to_path_buf();
        let err = compare_summary(&opts).unwrap_err();
        assert!(matches!(err, DocbenchError::InvalidInput { .. }));
        assert_eq!(err.error_code().code(), 3);
    }

    #[test]
    fn report_lists_top_pairs() {
        let dir = TempDir::new().unwrap();
        let opts = options(
            dir.path(),
            r#"{"m.f": "Compute the checksum of a file."}"#,
            "- `m.f`: Compute the checksum of a file.\n",
        );
        let outcome = compare_summary(&opts).unwrap();
        let report = render_report(&outcome, &opts.output);
        assert!(report.contains("Mean similarity: 1.0000"));
        assert!(report.contains("1. m.f"));
        assert!(report.contains("Top 1 most similar pairs:"));
    }
}
