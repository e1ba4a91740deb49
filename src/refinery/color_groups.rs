// * Pattern-based color grouping over option strings
// * Unlike vocabulary matching, every occurrence counts and matching ignores case

use super::ranked::{FrequencyTable, RankedItem};
use crate::config::constants::COLOR_GROUP_TOP_N;
use crate::dataset::{Column, Dataset};
use regex::Regex;

/// Counts color mentions with a single case-insensitive alternation
#[derive(Debug, Clone)]
pub struct ColorGroupExtractor {
    pattern: Option<Regex>,
    top_n: usize,
}

impl ColorGroupExtractor {
    /// Compiles the alternation; an empty or unusable vocabulary matches nothing
    pub fn new(colors: &[String]) -> Self {
        let alternatives: Vec<String> = colors
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| regex::escape(c))
            .collect();

        let pattern = if alternatives.is_empty() {
            None
        } else {
            match Regex::new(&format!("(?i)({})", alternatives.join("|"))) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(error = %e, "Color pattern failed to compile");
                    None
                }
            }
        };

        Self {
            pattern,
            top_n: COLOR_GROUP_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Top colors over the option column
    pub fn extract(&self, dataset: &Dataset) -> Vec<RankedItem> {
        self.extract_texts(dataset.texts(Column::OptionInfo))
    }

    /// Top colors over arbitrary option texts, labelled by the matched text
    pub fn extract_texts<'a, I>(&self, texts: I) -> Vec<RankedItem>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };

        let mut table = FrequencyTable::new();
        for text in texts {
            for m in pattern.find_iter(text) {
                table.add(m.as_str());
            }
        }
        table.ranked(self.top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_every_occurrence() {
        let extractor = ColorGroupExtractor::new(&colors(&["Black", "Navy"]));
        let ranked = extractor.extract_texts(["Black/Navy", "Navy/L", "black"]);

        assert_eq!(ranked[0], RankedItem::new("Navy", 2));
        // * Matched text is kept as written
        assert!(ranked.contains(&RankedItem::new("Black", 1)));
        assert!(ranked.contains(&RankedItem::new("black", 1)));
    }

    #[test]
    fn test_empty_inputs() {
        let extractor = ColorGroupExtractor::new(&colors(&["블랙"]));
        assert!(extractor.extract_texts(Vec::<&str>::new()).is_empty());

        let no_vocab = ColorGroupExtractor::new(&[]);
        assert!(no_vocab.extract_texts(["블랙"]).is_empty());
    }

    #[test]
    fn test_metacharacters_escaped() {
        let extractor = ColorGroupExtractor::new(&colors(&["블랙(무광)"]));
        let ranked = extractor.extract_texts(["블랙(무광)/FREE"]);
        assert_eq!(ranked, vec![RankedItem::new("블랙(무광)", 1)]);
    }

    #[test]
    fn test_top_n() {
        let extractor = ColorGroupExtractor::new(&colors(&["a", "b", "c"])).with_top_n(2);
        assert_eq!(extractor.extract_texts(["a b c"]).len(), 2);
    }
}
