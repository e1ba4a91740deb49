// * Attribute aggregation: curated vocabularies matched against option strings and product text

use crate::config::constants::{ATTRIBUTE_TOP_N, FREE_SIZE_LABEL};
use crate::config::{AttributeClass, Vocabulary};
use crate::dataset::{Column, Dataset};
use crate::refinery::{FrequencyTable, RankedItem, VocabularyMatcher};
use serde::{Deserialize, Serialize};

// * Materials and designs are read from the name first, then the detail description
const PRODUCT_TEXT_COLUMNS: [Column; 2] = [Column::ProductName, Column::Description];

/// Size ranking plus the share of FREE sizes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeInsights {
    pub top_items: Vec<RankedItem>,
    /// Percentage (0-100) of matched sizes that are FREE
    pub free_size_ratio: f64,
}

/// Runs vocabulary matching for each attribute class
pub struct AttributeAggregator<'a> {
    vocabulary: &'a Vocabulary,
    top_n: usize,
}

impl<'a> AttributeAggregator<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self {
            vocabulary,
            top_n: ATTRIBUTE_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    fn tally(&self, dataset: &Dataset, class: AttributeClass, columns: &[Column]) -> FrequencyTable {
        VocabularyMatcher::new(self.vocabulary.attribute(class)).tally(dataset, columns)
    }

    /// Colors named in option strings
    pub fn colors(&self, dataset: &Dataset) -> Vec<RankedItem> {
        self.tally(dataset, AttributeClass::Colors, &[Column::OptionInfo])
            .ranked(self.top_n)
    }

    /// Sizes named in option strings, with the FREE-size share
    pub fn sizes(&self, dataset: &Dataset) -> SizeInsights {
        let table = self.tally(dataset, AttributeClass::Sizes, &[Column::OptionInfo]);
        SizeInsights {
            top_items: table.ranked(self.top_n),
            free_size_ratio: free_size_ratio(&table),
        }
    }

    /// Materials named in product names and descriptions
    pub fn materials(&self, dataset: &Dataset) -> Vec<RankedItem> {
        self.tally(dataset, AttributeClass::Materials, &PRODUCT_TEXT_COLUMNS)
            .ranked(self.top_n)
    }

    /// Design elements named in product names and descriptions
    pub fn designs(&self, dataset: &Dataset) -> Vec<RankedItem> {
        self.tally(dataset, AttributeClass::Designs, &PRODUCT_TEXT_COLUMNS)
            .ranked(self.top_n)
    }
}

/// FREE count over all matched sizes, as a percentage; 0 when nothing matched
pub fn free_size_ratio(sizes: &FrequencyTable) -> f64 {
    let total = sizes.total();
    if total == 0 {
        return 0.0;
    }
    sizes.get(FREE_SIZE_LABEL) as f64 / total as f64 * 100.0
}
