// * Curated vocabulary matching: first keyword (list order) found in a value wins that value
// * Matching is case-sensitive on the raw text; option strings are not normalized

use super::ranked::{FrequencyTable, RankedItem};
use crate::dataset::{Column, Dataset};

/// Matches one curated keyword list against text columns
#[derive(Debug, Clone)]
pub struct VocabularyMatcher<'a> {
    keywords: &'a [String],
}

impl<'a> VocabularyMatcher<'a> {
    pub fn new(keywords: &'a [String]) -> Self {
        Self { keywords }
    }

    /// First keyword contained in `text`, if any
    pub fn first_match(&self, text: &str) -> Option<&'a str> {
        self.keywords
            .iter()
            .find(|k| !k.is_empty() && text.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Counts first matches over every value of the given columns, in column order
    ///
    /// Absent columns contribute nothing.
    pub fn tally(&self, dataset: &Dataset, columns: &[Column]) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for &column in columns {
            for text in dataset.texts(column) {
                if let Some(keyword) = self.first_match(text) {
                    table.add(keyword);
                }
            }
        }
        table
    }

    /// Top `top_n` keywords of a single column
    pub fn extract(&self, dataset: &Dataset, column: Column, top_n: usize) -> Vec<RankedItem> {
        self.tally(dataset, &[column]).ranked(top_n)
    }

    /// Top `top_n` keywords accumulated across several columns
    pub fn extract_columns(&self, dataset: &Dataset, columns: &[Column], top_n: usize) -> Vec<RankedItem> {
        self.tally(dataset, columns).ranked(top_n)
    }
}
