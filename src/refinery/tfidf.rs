// * TF-IDF keyword ranking over unigrams and bigrams
// * Weight = raw tf * smooth idf, L2-normalized per document; a term's score is its mean weight

use super::normalizer::TextNormalizer;
use super::ranked::RankedItem;
use super::vectorizer::{fit_counts, TermMatrix, VectorizerConfig};
use crate::config::constants::{TFIDF_MAX_FEATURES, TFIDF_MIN_DF, TFIDF_MIN_GROUP_SIZE};
use crate::dataset::{Column, Dataset};
use crate::errors::ExtractError;
use std::collections::{BTreeMap, HashMap};

/// Configuration for TF-IDF ranking
#[derive(Debug, Clone)]
pub struct TfidfConfig {
    pub vectorizer: VectorizerConfig,
    /// Category groups with fewer records are skipped in stratified mode
    pub min_group_size: usize,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self {
            vectorizer: VectorizerConfig::new(TFIDF_MAX_FEATURES, TFIDF_MIN_DF, (1, 2)),
            min_group_size: TFIDF_MIN_GROUP_SIZE,
        }
    }
}

/// TF-IDF keyword extractor
#[derive(Debug, Clone)]
pub struct TfidfKeywordExtractor {
    normalizer: TextNormalizer,
    config: TfidfConfig,
}

impl TfidfKeywordExtractor {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self::with_config(normalizer, TfidfConfig::default())
    }

    pub fn with_config(normalizer: TextNormalizer, config: TfidfConfig) -> Self {
        Self { normalizer, config }
    }

    pub fn config(&self) -> &TfidfConfig {
        &self.config
    }

    /// Top `n_keywords` terms of a text column over the whole corpus
    pub fn extract(&self, dataset: &Dataset, column: Column, n_keywords: usize) -> Vec<RankedItem> {
        let documents = self.normalizer.normalize_all(dataset.texts(column));
        self.extract_documents(&documents, n_keywords)
    }

    /// Ranks already-normalized documents; an empty vocabulary yields an empty list
    pub fn extract_documents(&self, documents: &[String], n_keywords: usize) -> Vec<RankedItem> {
        match self.try_extract_documents(documents, n_keywords) {
            Ok(ranked) => ranked,
            Err(e) => {
                tracing::warn!(error = %e, documents = documents.len(), "TF-IDF produced no keywords");
                Vec::new()
            }
        }
    }

    pub fn try_extract_documents(
        &self,
        documents: &[String],
        n_keywords: usize,
    ) -> Result<Vec<RankedItem>, ExtractError> {
        if documents.is_empty() {
            return Err(ExtractError::InsufficientDocuments { needed: 1, actual: 0 });
        }

        let matrix = fit_counts(documents, &self.config.vectorizer)?;
        let scores = mean_tfidf(&matrix);

        let mut order: Vec<usize> = (0..matrix.n_terms())
            .filter(|&i| is_keyword_term(&matrix.terms[i]))
            .collect();
        // * Stable over alphabetical column order: equal scores keep the earlier term
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        Ok(order
            .into_iter()
            .take(n_keywords)
            .map(|i| RankedItem::scored(matrix.terms[i].clone(), matrix.document_frequency[i], scores[i]))
            .collect())
    }

    /// Per-category extraction merged by summing scores of shared terms
    ///
    /// Categories with fewer than `min_group_size` records are skipped; records without a
    /// category code are ignored. A missing category column yields an empty list.
    pub fn extract_by_category(&self, dataset: &Dataset, column: Column, n_keywords: usize) -> Vec<RankedItem> {
        if !dataset.has_column(Column::Category) || !dataset.has_column(column) {
            return Vec::new();
        }

        let mut groups: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        let mut sizes: BTreeMap<&str, usize> = BTreeMap::new();
        for record in dataset.records() {
            let Some(code) = record.category.as_deref() else {
                continue;
            };
            *sizes.entry(code).or_insert(0) += 1;
            if let Some(text) = record.text(column) {
                groups
                    .entry(code)
                    .or_default()
                    .push(self.normalizer.normalize(Some(text)));
            }
        }

        let mut merged: Vec<RankedItem> = Vec::new();
        let mut slot: HashMap<String, usize> = HashMap::new();

        for (code, documents) in &groups {
            if sizes.get(code).copied().unwrap_or(0) < self.config.min_group_size {
                tracing::debug!(category = code, "Category group too small for TF-IDF");
                continue;
            }
            for item in self.extract_documents(documents, n_keywords) {
                match slot.get(&item.label) {
                    Some(&i) => {
                        let entry = &mut merged[i];
                        entry.count += item.count;
                        entry.score = Some(entry.rank_key() + item.rank_key());
                    }
                    None => {
                        slot.insert(item.label.clone(), merged.len());
                        merged.push(item);
                    }
                }
            }
        }

        merged.sort_by(|a, b| b.rank_key().total_cmp(&a.rank_key()));
        merged.truncate(n_keywords);
        merged
    }
}

/// Mean L2-normalized TF-IDF weight of every term
pub fn mean_tfidf(matrix: &TermMatrix) -> Vec<f64> {
    let n_docs = matrix.n_documents();
    let n_terms = matrix.n_terms();
    if n_docs == 0 {
        return vec![0.0; n_terms];
    }

    let idf: Vec<f64> = matrix
        .document_frequency
        .iter()
        .map(|&df| ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let mut sums = vec![0.0; n_terms];
    for row in &matrix.counts {
        let weighted: Vec<f64> = row.iter().zip(&idf).map(|(tf, idf)| tf * idf).collect();
        let norm = weighted.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm == 0.0 {
            continue;
        }
        for (sum, w) in sums.iter_mut().zip(&weighted) {
            *sum += w / norm;
        }
    }

    sums.into_iter().map(|s| s / n_docs as f64).collect()
}

// * 2+ chars, word/Hangul chars only; a bigram's single separating space is allowed
fn is_keyword_term(term: &str) -> bool {
    term.chars().count() >= 2
        && term
            .split(' ')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_alphanumeric() || c == '_'))
}
