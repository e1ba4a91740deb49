// * Term-document matrix construction shared by TF-IDF ranking and style clustering
// * Vocabulary: n-grams of `\w\w+` tokens, min document frequency, capped at the most frequent terms,
// * finally ordered alphabetically so column indices are deterministic

use crate::errors::ExtractError;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

static PATTERN_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid term regex"));

/// Vectorizer settings
#[derive(Debug, Clone, PartialEq)]
pub struct VectorizerConfig {
    /// Cap on vocabulary size, keeping the most frequent terms
    pub max_features: usize,
    /// Terms in fewer documents than this are dropped
    pub min_df: usize,
    /// Inclusive n-gram range
    pub ngram_range: (usize, usize),
}

impl VectorizerConfig {
    pub fn new(max_features: usize, min_df: usize, ngram_range: (usize, usize)) -> Self {
        Self {
            max_features,
            min_df,
            ngram_range,
        }
    }
}

/// Dense raw-count matrix: one row per document, one column per term
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatrix {
    pub terms: Vec<String>,
    pub counts: Vec<Vec<f64>>,
    pub document_frequency: Vec<usize>,
}

impl TermMatrix {
    pub fn n_documents(&self) -> usize {
        self.counts.len()
    }

    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }
}

/// Splits a normalized document into its n-gram terms
pub fn analyze(document: &str, ngram_range: (usize, usize)) -> Vec<String> {
    let tokens: Vec<&str> = PATTERN_TERM.find_iter(document).map(|m| m.as_str()).collect();
    let (min_n, max_n) = (ngram_range.0.max(1), ngram_range.1.max(ngram_range.0.max(1)));

    let mut terms = Vec::new();
    for n in min_n..=max_n {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

/// Builds the count matrix for `documents`
///
/// Returns `EmptyVocabulary` when no term survives pruning.
pub fn fit_counts(documents: &[String], config: &VectorizerConfig) -> Result<TermMatrix, ExtractError> {
    let analyzed: Vec<Vec<String>> = documents
        .iter()
        .map(|d| analyze(d, config.ngram_range))
        .collect();

    // * Corpus-wide term frequency and document frequency, alphabetically keyed
    let mut totals: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for terms in &analyzed {
        let mut in_doc: HashMap<&str, usize> = HashMap::new();
        for term in terms {
            *in_doc.entry(term.as_str()).or_insert(0) += 1;
        }
        for (term, count) in in_doc {
            let entry = totals.entry(term).or_insert((0, 0));
            entry.0 += count;
            entry.1 += 1;
        }
    }

    let mut kept: Vec<(&str, usize, usize)> = totals
        .into_iter()
        .filter(|(_, (_, df))| *df >= config.min_df)
        .map(|(term, (tf, df))| (term, tf, df))
        .collect();

    if kept.is_empty() {
        return Err(ExtractError::EmptyVocabulary);
    }

    // * Stable sort on the alphabetical order: equal frequencies keep the earlier term
    if kept.len() > config.max_features {
        kept.sort_by(|a, b| b.1.cmp(&a.1));
        kept.truncate(config.max_features);
        kept.sort_by(|a, b| a.0.cmp(b.0));
    }

    let column: HashMap<&str, usize> = kept.iter().enumerate().map(|(i, t)| (t.0, i)).collect();
    let mut counts = vec![vec![0.0; kept.len()]; documents.len()];
    for (row, terms) in analyzed.iter().enumerate() {
        for term in terms {
            if let Some(&col) = column.get(term.as_str()) {
                counts[row][col] += 1.0;
            }
        }
    }

    Ok(TermMatrix {
        terms: kept.iter().map(|t| t.0.to_string()).collect(),
        document_frequency: kept.iter().map(|t| t.2).collect(),
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_analyze_bigrams() {
        let terms = analyze("린넨 셔츠 화이트", (1, 2));
        assert_eq!(
            terms,
            vec!["린넨", "셔츠", "화이트", "린넨 셔츠", "셔츠 화이트"]
        );
    }

    #[test]
    fn test_single_char_tokens_skipped() {
        assert_eq!(analyze("a 셔 cd", (1, 1)), vec!["cd"]);
    }

    #[test]
    fn test_min_df_prunes() {
        let matrix = fit_counts(
            &docs(&["린넨 셔츠", "린넨 팬츠", "코튼 티셔츠"]),
            &VectorizerConfig::new(100, 2, (1, 1)),
        )
        .unwrap();

        assert_eq!(matrix.terms, vec!["린넨"]);
        assert_eq!(matrix.counts, vec![vec![1.0], vec![1.0], vec![0.0]]);
        assert_eq!(matrix.document_frequency, vec![2]);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let matrix = fit_counts(
            &docs(&["aa bb cc", "aa bb", "aa"]),
            &VectorizerConfig::new(2, 1, (1, 1)),
        )
        .unwrap();

        assert_eq!(matrix.terms, vec!["aa", "bb"]);
    }

    #[test]
    fn test_empty_vocabulary_is_error() {
        let result = fit_counts(&docs(&["aa", "bb"]), &VectorizerConfig::new(100, 5, (1, 2)));
        assert_eq!(result, Err(ExtractError::EmptyVocabulary));
    }
}
