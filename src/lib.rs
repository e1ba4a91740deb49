// * order-insights: keyword, attribute and sales insights from e-commerce order exports
// * Pipeline: dataset -> refinery extractors + engine aggregates -> insights -> summary -> guide

pub mod config;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod ops;
pub mod refinery;

pub use config::Vocabulary;
pub use dataset::{Column, Dataset, OrderRecord};
pub use engine::{analyze, AnalysisReport, AssemblerConfig, InsightAssembler, Insights, RecommendationGuide};
pub use errors::{ExtractError, InsightError};
pub use refinery::RankedItem;
