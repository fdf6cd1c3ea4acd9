//! Summary statistics over match results.

use serde::{Deserialize, Serialize};

use crate::matcher::{MatchKind, MatchResult};

/// Default number of entries in the top list.
pub const DEFAULT_TOP_K: usize = 5;

/// Distribution of positive similarity scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
}

/// Aggregated view of a match run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: usize,
    pub exact_matches: usize,
    pub fuzzy_matches: usize,
    pub no_matches: usize,
    /// Absent when no result scored above zero.
    pub scores: Option<ScoreSummary>,
    /// Highest-scoring results, ties in original order.
    pub top: Vec<MatchResult>,
}

/// Aggregate `results`, keeping the `top_k` best pairs.
pub fn summarize(results: &[MatchResult], top_k: usize) -> Statistics {
    let mut exact_matches = 0;
    let mut fuzzy_matches = 0;
    let mut no_matches = 0;
    for result in results {
        match result.kind() {
            MatchKind::Exact => exact_matches += 1,
            MatchKind::Fuzzy => fuzzy_matches += 1,
            MatchKind::NoMatch => no_matches += 1,
        }
    }

    let positive: Vec<f64> = results
        .iter()
        .map(|r| r.similarity)
        .filter(|s| *s > 0.0)
        .collect();

    let mut top: Vec<MatchResult> = results.to_vec();
    // sort_by is stable, so equal scores keep their input order
    top.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    top.truncate(top_k);

    Statistics {
        total: results.len(),
        exact_matches,
        fuzzy_matches,
        no_matches,
        scores: score_summary(positive),
        top,
    }
}

fn score_summary(mut scores: Vec<f64>) -> Option<ScoreSummary> {
    if scores.is_empty() {
        return None;
    }
    scores.sort_by(f64::total_cmp);
    let count = scores.len();
    let mean = scores.iter().sum::<f64>() / count as f64;
    let median = if count % 2 == 1 {
        scores[count / 2]
    } else {
        (scores[count / 2 - 1] + scores[count / 2]) / 2.0
    };
    Some(ScoreSummary {
        count,
        mean,
        median,
        max: scores[count - 1],
        min: scores[0],
    })
}
