// * Style keywords: K-means over raw term counts, then the heaviest terms of each cluster
// * Unsupervised and approximate; terms may repeat across clusters

use super::kmeans::{KMeans, KMeansConfig};
use super::normalizer::TextNormalizer;
use super::vectorizer::{fit_counts, VectorizerConfig};
use crate::config::constants::{
    CLUSTER_COUNT, CLUSTER_KEYWORDS, CLUSTER_MAX_FEATURES, CLUSTER_MIN_DF, CLUSTER_MIN_FEATURES,
    DOCS_PER_CLUSTER, KMEANS_SEED,
};
use crate::dataset::{Column, Dataset};
use crate::errors::ExtractError;

/// Configuration for style clustering
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub n_clusters: usize,
    pub n_keywords: usize,
    pub vectorizer: VectorizerConfig,
    /// Fewer surviving terms than this means there is nothing to cluster
    pub min_features: usize,
    pub seed: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            n_clusters: CLUSTER_COUNT,
            n_keywords: CLUSTER_KEYWORDS,
            vectorizer: VectorizerConfig::new(CLUSTER_MAX_FEATURES, CLUSTER_MIN_DF, (1, 1)),
            min_features: CLUSTER_MIN_FEATURES,
            seed: KMEANS_SEED,
        }
    }
}

/// Extracts style keywords by clustering product names
#[derive(Debug, Clone)]
pub struct ClusterKeywordExtractor {
    normalizer: TextNormalizer,
    config: ClusterConfig,
}

impl ClusterKeywordExtractor {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self::with_config(normalizer, ClusterConfig::default())
    }

    pub fn with_config(normalizer: TextNormalizer, config: ClusterConfig) -> Self {
        Self { normalizer, config }
    }

    /// Effective cluster count: at most `n_clusters`, about one cluster per five documents
    pub fn effective_k(&self, n_documents: usize) -> usize {
        self.config
            .n_clusters
            .min(n_documents / DOCS_PER_CLUSTER + 1)
    }

    /// Flattened top terms of every non-empty cluster, in cluster order
    ///
    /// Too few documents or terms yields `Ok(vec![])`; only a failing fit is an error.
    pub fn extract(&self, dataset: &Dataset, column: Column) -> Result<Vec<String>, ExtractError> {
        let documents = self.normalizer.normalize_all(dataset.texts(column));
        self.extract_documents(&documents)
    }

    pub fn extract_documents(&self, documents: &[String]) -> Result<Vec<String>, ExtractError> {
        if documents.is_empty() || documents.len() < self.config.n_clusters {
            return Ok(Vec::new());
        }

        let matrix = match fit_counts(documents, &self.config.vectorizer) {
            Ok(matrix) => matrix,
            Err(ExtractError::EmptyVocabulary) => {
                tracing::debug!(documents = documents.len(), "No terms left for style clustering");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        if matrix.n_terms() < self.config.min_features {
            tracing::debug!(terms = matrix.n_terms(), "Too few terms for style clustering");
            return Ok(Vec::new());
        }

        let k = self.effective_k(documents.len());
        let fit = KMeans::new(KMeansConfig {
            k,
            seed: self.config.seed,
            ..KMeansConfig::default()
        })
        .fit(&matrix.counts)?;

        let mut keywords = Vec::new();
        for cluster in 0..k {
            let members = fit.members(cluster);
            if members.is_empty() {
                continue;
            }

            let mut totals = vec![0.0; matrix.n_terms()];
            for &row in &members {
                for (total, count) in totals.iter_mut().zip(&matrix.counts[row]) {
                    *total += count;
                }
            }

            // * Heaviest first; equal weights keep alphabetical term order
            let mut order: Vec<usize> = (0..matrix.n_terms()).filter(|&t| totals[t] > 0.0).collect();
            order.sort_by(|&a, &b| totals[b].total_cmp(&totals[a]));
            keywords.extend(
                order
                    .into_iter()
                    .take(self.config.n_keywords)
                    .map(|t| matrix.terms[t].clone()),
            );
        }

        tracing::debug!(k, keywords = keywords.len(), "Style clustering complete");
        Ok(keywords)
    }
}
