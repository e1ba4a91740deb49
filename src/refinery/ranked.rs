// * RankedItem: the single output unit of every extractor and aggregator
// * FrequencyTable: insertion-ordered counter whose ranking breaks ties by first appearance

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A labelled count, optionally carrying a weight score
///
/// Count-ranked lists are ordered by `count`; score-ranked lists (TF-IDF) are
/// ordered by `score` and use `count` for the number of documents containing the term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub label: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl RankedItem {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
            score: None,
        }
    }

    pub fn scored(label: impl Into<String>, count: usize, score: f64) -> Self {
        Self {
            label: label.into(),
            count,
            score: Some(score),
        }
    }

    /// Key the item was ranked by
    pub fn rank_key(&self) -> f64 {
        self.score.unwrap_or(self.count as f64)
    }
}

/// Whether a list is ordered non-increasing by its rank key
pub fn is_ranked(items: &[RankedItem]) -> bool {
    items
        .windows(2)
        .all(|pair| pair[0].rank_key() >= pair[1].rank_key())
}

/// Labels of the first `n` items
pub fn labels(items: &[RankedItem], n: usize) -> Vec<String> {
    items.iter().take(n).map(|i| i.label.clone()).collect()
}

/// Counter that remembers first-seen order
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str) {
        self.add_n(label, 1);
    }

    pub fn add_n(&mut self, label: &str, n: usize) {
        match self.index.get(label) {
            Some(&slot) => self.order[slot].1 += n,
            None => {
                self.index.insert(label.to_string(), self.order.len());
                self.order.push((label.to_string(), n));
            }
        }
    }

    pub fn get(&self, label: &str) -> usize {
        self.index
            .get(label)
            .map(|&slot| self.order[slot].1)
            .unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.order.iter().map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Top `n` entries by count; stable sort keeps first-seen order among ties
    pub fn ranked(&self, n: usize) -> Vec<RankedItem> {
        let mut entries: Vec<&(String, usize)> = self.order.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
            .into_iter()
            .take(n)
            .map(|(label, count)| RankedItem::new(label.clone(), *count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut table = FrequencyTable::new();
        for label in ["b", "a", "c", "a", "c"] {
            table.add(label);
        }

        let ranked = table.ranked(10);
        let order: Vec<&str> = ranked.iter().map(|i| i.label.as_str()).collect();

        // * a and c tie at 2; a was seen first
        assert_eq!(order, vec!["a", "c", "b"]);
        assert!(is_ranked(&ranked));
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_top_n_cut() {
        let mut table = FrequencyTable::new();
        table.add_n("x", 3);
        table.add_n("y", 2);
        table.add_n("z", 1);

        assert_eq!(table.ranked(2).len(), 2);
        assert_eq!(table.get("missing"), 0);
    }

    #[test]
    fn test_rank_key_prefers_score() {
        let item = RankedItem::scored("term", 7, 0.25);
        assert_eq!(item.rank_key(), 0.25);
        assert_eq!(RankedItem::new("term", 7).rank_key(), 7.0);
    }
}
