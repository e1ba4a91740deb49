// * The Engine: column aggregates, insight assembly, summary and recommendation guide
// * Borrows a Dataset and a Vocabulary; produces an immutable AnalysisReport

pub mod attributes;
pub mod guide;
pub mod insights;
pub mod sales;
pub mod summary;

// * Re-exports for convenient access
pub use attributes::{free_size_ratio, AttributeAggregator, SizeInsights};
pub use guide::{generate_guide, ChannelProduct, RecommendationGuide};
pub use insights::{format_period, AssemblerConfig, AutoKeywords, InsightAssembler, Insights};
pub use sales::{
    dominant_band, price_band_index, Bestseller, CategoryShare, ChannelInsights, PriceBand,
    SalesAggregator,
};
pub use summary::InsightSummary;

use crate::config::Vocabulary;
use crate::dataset::Dataset;
use crate::errors::InsightError;
use serde::Serialize;

/// Output of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub insights: Insights,
    pub guide: Option<RecommendationGuide>,
    /// Readable findings derived from the summary
    pub highlights: Vec<String>,
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String, InsightError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, InsightError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs the whole pipeline: insights, summary, guide
///
/// # Example
/// ```ignore
/// use order_insights::config::Vocabulary;
/// use order_insights::dataset::load_json_str;
/// use order_insights::engine::{analyze, AssemblerConfig};
///
/// let vocabulary = Vocabulary::from_env();
/// let dataset = load_json_str(json, &vocabulary)?;
/// let report = analyze(&dataset, &vocabulary, AssemblerConfig::default());
/// println!("{}", report.to_json_pretty()?);
/// ```
pub fn analyze(dataset: &Dataset, vocabulary: &Vocabulary, config: AssemblerConfig) -> AnalysisReport {
    let insights = InsightAssembler::with_config(vocabulary, config).assemble(dataset);
    let summary = InsightSummary::from_insights(&insights);
    let guide = generate_guide(&summary, vocabulary);

    tracing::info!(guide = guide.is_some(), "Analysis complete");

    AnalysisReport {
        highlights: summary.highlights(),
        insights,
        guide,
    }
}
