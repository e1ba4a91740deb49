// * InsightAssembler: runs every extractor and aggregator into one Insights value
// * Each section is guarded; a failing section is logged and left at its default

use super::attributes::{AttributeAggregator, SizeInsights};
use super::sales::{Bestseller, CategoryShare, ChannelInsights, PriceBand, SalesAggregator};
use crate::config::constants::{FREQUENCY_TOP_N, PERIOD_DATE_FORMAT, PERIOD_UNKNOWN, TFIDF_TOP_N};
use crate::config::{AttributeClass, Vocabulary};
use crate::dataset::{Column, Dataset};
use crate::errors::{ExtractError, InsightError};
use crate::refinery::{
    ClusterConfig, ClusterKeywordExtractor, ColorGroupExtractor, FrequencyKeywordExtractor,
    RankedItem, TextNormalizer, TfidfConfig, TfidfKeywordExtractor,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use xxhash_rust::xxh64::xxh64;

/// Keywords discovered without a curated vocabulary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoKeywords {
    pub style_keywords: Vec<String>,
    pub additional_product_keywords: Vec<RankedItem>,
    pub color_groups: Vec<RankedItem>,
}

/// Every section of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub start_date: String,
    pub end_date: String,
    pub channels: ChannelInsights,
    pub categories: Vec<CategoryShare>,
    pub product_keywords: Vec<RankedItem>,
    pub colors: Vec<RankedItem>,
    pub sizes: SizeInsights,
    pub materials: Vec<RankedItem>,
    pub designs: Vec<RankedItem>,
    pub price_ranges: Vec<PriceBand>,
    pub bestsellers: Vec<Bestseller>,
    pub channel_prices: BTreeMap<String, f64>,
    pub auto_keywords: AutoKeywords,
}

impl Insights {
    /// Canonical JSON bytes
    pub fn to_json(&self) -> Result<String, InsightError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, InsightError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 64-bit fingerprint of the canonical JSON; identical inputs give identical fingerprints
    pub fn fingerprint(&self) -> Result<u64, InsightError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(xxh64(&bytes, 0))
    }
}

/// Per-run knobs for the assembler
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Rank additional keywords per category and merge, instead of over the whole corpus
    pub stratify_tfidf: bool,
    pub additional_keywords: usize,
    pub frequency_top_n: usize,
    pub tfidf: TfidfConfig,
    pub cluster: ClusterConfig,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            stratify_tfidf: true,
            additional_keywords: TFIDF_TOP_N,
            frequency_top_n: FREQUENCY_TOP_N,
            tfidf: TfidfConfig::default(),
            cluster: ClusterConfig::default(),
        }
    }
}

/// Builds Insights from a dataset
pub struct InsightAssembler<'a> {
    vocabulary: &'a Vocabulary,
    config: AssemblerConfig,
}

impl<'a> InsightAssembler<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self::with_config(vocabulary, AssemblerConfig::default())
    }

    pub fn with_config(vocabulary: &'a Vocabulary, config: AssemblerConfig) -> Self {
        Self { vocabulary, config }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Runs every section. Never fails; failed sections keep their default.
    pub fn assemble(&self, dataset: &Dataset) -> Insights {
        let started = Instant::now();
        let normalizer = TextNormalizer::from_vocabulary(self.vocabulary);
        let attributes = AttributeAggregator::new(self.vocabulary);
        let sales = SalesAggregator::new(self.vocabulary);

        let (start_date, end_date) = format_period(dataset);
        tracing::info!(
            records = dataset.len(),
            start = %start_date,
            end = %end_date,
            "Assembling insights"
        );

        let insights = Insights {
            start_date,
            end_date,
            channels: guarded("channels", || Ok(sales.channels(dataset))),
            categories: guarded("categories", || Ok(sales.categories(dataset))),
            product_keywords: guarded("product_keywords", || {
                Ok(FrequencyKeywordExtractor::new(normalizer.clone()).extract(
                    dataset,
                    Column::ProductName,
                    self.config.frequency_top_n,
                ))
            }),
            colors: guarded("colors", || Ok(attributes.colors(dataset))),
            sizes: guarded("sizes", || Ok(attributes.sizes(dataset))),
            materials: guarded("materials", || Ok(attributes.materials(dataset))),
            designs: guarded("designs", || Ok(attributes.designs(dataset))),
            price_ranges: guarded("price_ranges", || Ok(sales.price_ranges(dataset))),
            bestsellers: guarded("bestsellers", || Ok(sales.bestsellers(dataset))),
            channel_prices: guarded("channel_prices", || Ok(sales.channel_prices(dataset))),
            auto_keywords: AutoKeywords {
                style_keywords: guarded("style_keywords", || {
                    ClusterKeywordExtractor::with_config(normalizer.clone(), self.config.cluster.clone())
                        .extract(dataset, Column::ProductName)
                }),
                additional_product_keywords: guarded("additional_product_keywords", || {
                    Ok(self.additional_keywords(&normalizer, dataset))
                }),
                color_groups: guarded("color_groups", || {
                    Ok(ColorGroupExtractor::new(self.vocabulary.attribute(AttributeClass::Colors))
                        .extract(dataset))
                }),
            },
        };

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            keywords = insights.product_keywords.len(),
            style_keywords = insights.auto_keywords.style_keywords.len(),
            "Insights assembled"
        );
        insights
    }

    // * Stratified ranking falls back to the whole corpus when no category group qualifies
    fn additional_keywords(&self, normalizer: &TextNormalizer, dataset: &Dataset) -> Vec<RankedItem> {
        let extractor = TfidfKeywordExtractor::with_config(normalizer.clone(), self.config.tfidf.clone());
        let n = self.config.additional_keywords;

        if self.config.stratify_tfidf {
            let stratified = extractor.extract_by_category(dataset, Column::ProductName, n);
            if !stratified.is_empty() {
                return stratified;
            }
            tracing::debug!("No category group qualified for TF-IDF, ranking the whole corpus");
        }
        extractor.extract(dataset, Column::ProductName, n)
    }
}

/// Runs one section; an error is logged with the section name and replaced by the default
fn guarded<T, F>(section: &'static str, run: F) -> T
where
    T: Default,
    F: FnOnce() -> Result<T, ExtractError>,
{
    match run() {
        Ok(value) => {
            tracing::debug!(section, "Section complete");
            value
        }
        Err(source) => {
            let error = InsightError::Section { section, source };
            tracing::warn!(%error, "Section defaulted");
            T::default()
        }
    }
}

/// Analysis period as formatted dates; unknown when no record carries a payment date
pub fn format_period(dataset: &Dataset) -> (String, String) {
    match dataset.period() {
        Some((start, end)) => (
            start.format(PERIOD_DATE_FORMAT).to_string(),
            end.format(PERIOD_DATE_FORMAT).to_string(),
        ),
        None => (PERIOD_UNKNOWN.to_string(), PERIOD_UNKNOWN.to_string()),
    }
}
