use thiserror::Error;

// * Failures inside the text refinery. Expected conditions are defaulted by the extractors themselves.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("No terms remain after document-frequency pruning")]
    EmptyVocabulary,

    #[error("Need at least {needed} documents, got {actual}")]
    InsufficientDocuments { needed: usize, actual: usize },

    #[error("Clustering failed: {0}")]
    Clustering(String),
}

// * Unified error type for the crate boundary (ingestion, CLI, guarded sections).
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Section '{section}' failed: {source}")]
    Section {
        section: &'static str,
        #[source]
        source: ExtractError,
    },
}
