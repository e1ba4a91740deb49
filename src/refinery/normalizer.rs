// * Text normalization shared by every free-text extractor
// * lowercase -> stop-word removal -> symbol removal -> whitespace collapse

use crate::config::Vocabulary;
use regex::Regex;
use std::sync::LazyLock;

// * Anything that is not a word char, whitespace or a Hangul syllable
static PATTERN_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s가-힣]").expect("Invalid symbol regex"));

static PATTERN_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Normalizer with its stop-words lowercased once up front
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    stop_words: Vec<String>,
}

impl TextNormalizer {
    pub fn new(stop_words: &[String]) -> Self {
        Self {
            stop_words: stop_words
                .iter()
                .map(|w| w.to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Self {
        Self::new(vocabulary.stop_words())
    }

    /// Normalizes one value; a missing value yields an empty string
    pub fn normalize(&self, text: Option<&str>) -> String {
        let Some(text) = text else {
            return String::new();
        };

        let mut cleaned = text.to_lowercase();

        // ! Order matters: stop-words are removed in list order, literally
        for word in &self.stop_words {
            if cleaned.contains(word.as_str()) {
                cleaned = cleaned.replace(word.as_str(), " ");
            }
        }

        let cleaned = PATTERN_SYMBOL.replace_all(&cleaned, " ");
        let cleaned = PATTERN_WHITESPACE.replace_all(&cleaned, " ");
        cleaned.trim().to_string()
    }

    /// Normalizes every value, preserving order
    pub fn normalize_all<'a, I>(&self, texts: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        texts.into_iter().map(|t| self.normalize(Some(t))).collect()
    }
}

/// One-shot normalization with an explicit stop-word list
pub fn normalize_text(text: Option<&str>, stop_words: &[String]) -> String {
    TextNormalizer::new(stop_words).normalize(text)
}
