//! TF-IDF cosine similarity between two descriptions.
//!
//! The two texts form their own two-document collection:
//!
//! 1. Lowercase and tokenize into runs of two or more word characters.
//! 2. Drop English stop words.
//! 3. Keep at most [`MAX_FEATURES`] terms, ordered by total count across both
//!    texts (ties by term).
//! 4. Weight raw counts by smoothed IDF `ln((1 + n) / (1 + df)) + 1`.
//! 5. L2-normalize and take the dot product.
//!
//! Degenerate inputs never fail: an empty text, or a vocabulary left empty by
//! stop-word removal, scores `0.0`.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of vocabulary terms kept.
pub const MAX_FEATURES: usize = 100;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Score the textual similarity of `a` and `b` in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let docs = [term_counts(a), term_counts(b)];
    let vocabulary = select_vocabulary(&docs);
    if vocabulary.is_empty() {
        tracing::debug!("empty vocabulary after stop-word removal, similarity is 0");
        return 0.0;
    }

    let n = docs.len() as f64;
    let vectors: Vec<Vec<f64>> = docs
        .iter()
        .map(|counts| {
            let weights: Vec<f64> = vocabulary
                .iter()
                .map(|term| {
                    let df = docs.iter().filter(|d| d.contains_key(term)).count() as f64;
                    let idf = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
                    counts.get(term).copied().unwrap_or(0) as f64 * idf
                })
                .collect();
            normalize(weights)
        })
        .collect();

    // Identical non-zero directions are exactly 1.0; the dot product can
    // round one ulp short.
    if vectors[0] == vectors[1] && vectors[0].iter().any(|w| *w > 0.0) {
        return 1.0;
    }

    let dot: f64 = vectors[0]
        .iter()
        .zip(&vectors[1])
        .map(|(x, y)| x * y)
        .sum();
    if dot.is_finite() {
        dot.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let lowered = text.to_lowercase();
    let mut counts = BTreeMap::new();
    for token in TOKEN.find_iter(&lowered) {
        let term = token.as_str();
        if !STOP_WORDS.contains(term) {
            *counts.entry(term.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn select_vocabulary(docs: &[BTreeMap<String, usize>]) -> Vec<String> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for doc in docs {
        for (term, count) in doc {
            *totals.entry(term.as_str()).or_insert(0) += count;
        }
    }
    let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
    // BTreeMap order makes ties fall back to the term itself.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(MAX_FEATURES);

    let mut vocabulary: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
    vocabulary.sort();
    vocabulary
}

fn normalize(mut weights: Vec<f64>) -> Vec<f64> {
    let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in &mut weights {
            *w /= norm;
        }
    }
    weights
}

/// The English stop word list used by common TF-IDF vectorizers.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can", "cannot",
    "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else", "elsewhere",
    "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything", "everywhere",
    "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five", "for", "former",
    "formerly", "forty", "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred", "i", "ie",
    "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself", "keep", "last",
    "latter", "latterly", "least", "less", "ltd", "made", "many", "may", "me", "meanwhile",
    "might", "mill", "mine", "more", "moreover", "most", "mostly", "move", "much", "must", "my",
    "myself", "name", "namely", "neither", "never", "nevertheless", "next", "nine", "no",
    "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often",
    "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours",
    "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re",
    "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several", "she", "should",
    "show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten",
    "than", "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third",
    "this", "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_text_scores_exactly_one() {
        for text in [
            "Generate descriptive statistics for a DataFrame.",
            "Generate descriptive statistics.",
            "Select the n largest values of a series by column",
            "Compute pairwise correlation of columns, excluding NA/null values.",
            "Return a new object with labels in the requested axis removed.",
        ] {
            assert_eq!(similarity(text, text), 1.0, "text: {}", text);
        }
    }

    #[test]
    fn same_terms_in_another_order_score_exactly_one() {
        assert_eq!(
            similarity("largest values series column", "column series values largest"),
            1.0
        );
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(similarity("", "anything here"), 0.0);
        assert_eq!(similarity("anything here", ""), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn stop_words_only_scores_zero() {
        assert_eq!(similarity("the and of", "it is a"), 0.0);
    }

    #[test]
    fn disjoint_vocabularies_score_zero() {
        assert_eq!(similarity("parse tokens quickly", "render widgets"), 0.0);
    }

    #[test]
    fn shared_term_scores_between_zero_and_one() {
        let score = similarity("Does foo.", "Performs foo operation");
        assert!(score > 0.0 && score < 1.0, "score was {}", score);
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(similarity("Merge Frames", "merge frames"), 1.0);
    }

    #[test]
    fn single_character_tokens_are_ignored() {
        // "x" and "y" are too short to be terms
        assert_eq!(similarity("x y", "x y"), 0.0);
    }

    #[test]
    fn symmetric() {
        let a = "Select the n largest values of a series";
        let b = "Return the largest n elements";
        assert!(approx(similarity(a, b), similarity(b, a)));
    }

    #[test]
    fn vocabulary_is_capped() {
        let a: Vec<String> = (0..150).map(|i| format!("term{}", i)).collect();
        let docs = [term_counts(&a.join(" ")), term_counts("term1 term1")];
        assert_eq!(select_vocabulary(&docs).len(), MAX_FEATURES);
        // The most frequent term always survives the cap
        assert!(select_vocabulary(&docs).contains(&"term1".to_string()));
    }
}
