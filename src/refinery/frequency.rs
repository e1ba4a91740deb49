// * Bag-of-words keyword ranking over normalized product names
// * Tokens are runs of 2+ Hangul/Latin letters; digits never form a token

use super::normalizer::TextNormalizer;
use super::ranked::{FrequencyTable, RankedItem};
use crate::config::constants::MIN_TOKEN_CHARS;
use crate::dataset::{Column, Dataset};
use regex::Regex;
use std::sync::LazyLock;

static PATTERN_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b[가-힣a-zA-Z]{{{},}}\b", MIN_TOKEN_CHARS)).expect("Invalid token regex")
});

/// Raw-frequency keyword extractor
#[derive(Debug, Clone)]
pub struct FrequencyKeywordExtractor {
    normalizer: TextNormalizer,
}

impl FrequencyKeywordExtractor {
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }

    /// Tokens of one already-normalized value
    pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
        PATTERN_TOKEN.find_iter(normalized).map(|m| m.as_str())
    }

    /// Top `top_n` tokens of a text column by raw count
    pub fn extract(&self, dataset: &Dataset, column: Column, top_n: usize) -> Vec<RankedItem> {
        self.extract_texts(dataset.texts(column), top_n)
    }

    pub fn extract_texts<'a, I>(&self, texts: I, top_n: usize) -> Vec<RankedItem>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = FrequencyTable::new();
        for text in texts {
            let normalized = self.normalizer.normalize(Some(text));
            for token in Self::tokens(&normalized) {
                table.add(token);
            }
        }
        table.ranked(top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_are_not_tokens() {
        let tokens: Vec<&str> = FrequencyKeywordExtractor::tokens("데님 2024 a b cd 7부").collect();

        // * "7부" is a single word run, so "부" has no boundary and single letters are too short
        assert_eq!(tokens, vec!["데님", "cd"]);
    }

    #[test]
    fn test_counts_across_corpus() {
        let extractor = FrequencyKeywordExtractor::new(TextNormalizer::default());
        let ranked = extractor.extract_texts(["린넨 셔츠", "린넨 팬츠", "셔츠"], 20);

        assert_eq!(ranked[0], RankedItem::new("린넨", 2));
        assert_eq!(ranked[1], RankedItem::new("셔츠", 2));
        assert_eq!(ranked[2], RankedItem::new("팬츠", 1));
    }

    #[test]
    fn test_stop_words_applied() {
        let stops = vec!["세트".to_string()];
        let extractor = FrequencyKeywordExtractor::new(TextNormalizer::new(&stops));
        let ranked = extractor.extract_texts(["니트세트", "니트 세트"], 20);

        assert_eq!(ranked, vec![RankedItem::new("니트", 2)]);
    }
}
