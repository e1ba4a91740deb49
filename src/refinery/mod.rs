// * The Refinery: free-text extraction over product names and option strings
// * Normalization, vocabulary matching, frequency/TF-IDF ranking, style clustering, color grouping

pub mod cluster;
pub mod color_groups;
pub mod frequency;
pub mod kmeans;
pub mod normalizer;
pub mod ranked;
pub mod tfidf;
pub mod vectorizer;
pub mod vocabulary_matcher;

// * Re-exports for convenient access
pub use cluster::{ClusterConfig, ClusterKeywordExtractor};
pub use color_groups::ColorGroupExtractor;
pub use frequency::FrequencyKeywordExtractor;
pub use kmeans::{KMeans, KMeansConfig, KMeansFit};
pub use normalizer::{normalize_text, TextNormalizer};
pub use ranked::{is_ranked, FrequencyTable, RankedItem};
pub use tfidf::{TfidfConfig, TfidfKeywordExtractor};
pub use vectorizer::{fit_counts, TermMatrix, VectorizerConfig};
pub use vocabulary_matcher::VocabularyMatcher;
