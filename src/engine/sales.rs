// * Sales aggregation: channels, price bands, bestsellers, categories, channel mean price
// * Every aggregate returns its typed empty value when a required column is missing

use crate::config::constants::{
    BESTSELLER_TOP_N, CATEGORY_TOP_N, CHANNEL_TOP_N, CONCENTRATION_CHANNELS, DISPLAY_NAME_KEEP,
    DISPLAY_NAME_MAX, PRICE_BAND_EDGES, PRICE_BAND_LABELS,
};
use crate::config::Vocabulary;
use crate::dataset::{Column, Dataset};
use crate::refinery::{FrequencyTable, RankedItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use unicode_segmentation::UnicodeSegmentation;

/// Channel distribution and top-3 concentration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelInsights {
    pub top_channels: Vec<RankedItem>,
    pub top3_channels: Vec<String>,
    /// Share of orders (percent, 1 decimal) taken by the top three channels
    pub top3_ratio: f64,
    pub total_orders: usize,
}

/// One price band of the histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    #[serde(flatten)]
    pub item: RankedItem,
    /// Share of priced orders (percent, 1 decimal)
    pub percent: f64,
}

/// A bestselling product; `item.label` keeps the full name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bestseller {
    pub rank: usize,
    pub display_name: String,
    #[serde(flatten)]
    pub item: RankedItem,
}

/// A category code with its display name; `item.label` is the code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub name: String,
    #[serde(flatten)]
    pub item: RankedItem,
}

/// Dominant band: the first band with the highest non-zero count
pub fn dominant_band(bands: &[PriceBand]) -> Option<&PriceBand> {
    bands
        .iter()
        .filter(|b| b.item.count > 0)
        .fold(None, |best: Option<&PriceBand>, band| match best {
            Some(b) if b.item.count >= band.item.count => Some(b),
            _ => Some(band),
        })
}

/// Band index for a price: left-inclusive, right-exclusive, last band open-ended
pub fn price_band_index(price: f64) -> Option<usize> {
    if !price.is_finite() || price < PRICE_BAND_EDGES[0] {
        return None;
    }
    PRICE_BAND_EDGES.iter().rposition(|&edge| price >= edge)
}

/// Truncates to `keep` graphemes plus "..." when longer than `max`
pub fn truncate_display(text: &str, max: usize, keep: usize) -> String {
    if text.graphemes(true).count() > max {
        let head: String = text.graphemes(true).take(keep).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Groupby/count/mean aggregates over the order table
pub struct SalesAggregator<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> SalesAggregator<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    fn counts(dataset: &Dataset, column: Column) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for value in dataset.texts(column) {
            table.add(value);
        }
        table
    }

    /// Orders per channel, top channels and top-3 concentration
    pub fn channels(&self, dataset: &Dataset) -> ChannelInsights {
        let table = Self::counts(dataset, Column::Channel);
        let total = table.total();
        if total == 0 {
            return ChannelInsights::default();
        }

        let top3 = table.ranked(CONCENTRATION_CHANNELS);
        let top3_sum: usize = top3.iter().map(|i| i.count).sum();

        ChannelInsights {
            top_channels: table.ranked(CHANNEL_TOP_N),
            top3_channels: top3.into_iter().map(|i| i.label).collect(),
            top3_ratio: round1(top3_sum as f64 / total as f64 * 100.0),
            total_orders: total,
        }
    }

    /// Histogram over the fixed price bands; empty when no record has a price
    pub fn price_ranges(&self, dataset: &Dataset) -> Vec<PriceBand> {
        if !dataset.has_column(Column::Price) {
            return Vec::new();
        }

        let mut counts = [0usize; PRICE_BAND_LABELS.len()];
        for price in dataset.records().iter().filter_map(|r| r.price) {
            if let Some(band) = price_band_index(price) {
                counts[band] += 1;
            }
        }

        let total: usize = counts.iter().sum();
        if total == 0 {
            return Vec::new();
        }

        PRICE_BAND_LABELS
            .iter()
            .zip(counts)
            .map(|(label, count)| PriceBand {
                item: RankedItem::new(*label, count),
                percent: round1(count as f64 / total as f64 * 100.0),
            })
            .collect()
    }

    /// Most ordered product names
    pub fn bestsellers(&self, dataset: &Dataset) -> Vec<Bestseller> {
        Self::counts(dataset, Column::ProductName)
            .ranked(BESTSELLER_TOP_N)
            .into_iter()
            .enumerate()
            .map(|(i, item)| Bestseller {
                rank: i + 1,
                display_name: truncate_display(&item.label, DISPLAY_NAME_MAX, DISPLAY_NAME_KEEP),
                item,
            })
            .collect()
    }

    /// Orders per category code with display names
    pub fn categories(&self, dataset: &Dataset) -> Vec<CategoryShare> {
        Self::counts(dataset, Column::Category)
            .ranked(CATEGORY_TOP_N)
            .into_iter()
            .map(|item| CategoryShare {
                name: self.vocabulary.category_name(&item.label),
                item,
            })
            .collect()
    }

    /// Mean price per channel; records without a price are left out of the mean
    pub fn channel_prices(&self, dataset: &Dataset) -> BTreeMap<String, f64> {
        if !dataset.has_column(Column::Channel) || !dataset.has_column(Column::Price) {
            return BTreeMap::new();
        }

        let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for record in dataset.records() {
            let (Some(channel), Some(price)) = (record.channel.as_deref(), record.price) else {
                continue;
            };
            let entry = sums.entry(channel).or_insert((0.0, 0));
            entry.0 += price;
            entry.1 += 1;
        }

        sums.into_iter()
            .map(|(channel, (sum, n))| (channel.to_string(), sum / n as f64))
            .collect()
    }
}
