// * Insight summary: the condensed view the recommendation guide is derived from

use super::insights::Insights;
use super::sales::dominant_band;
use crate::refinery::ranked::labels;
use crate::refinery::RankedItem;
use serde::Serialize;

const SUMMARY_TOP: usize = 3;
const SUMMARY_PRODUCTS: usize = 5;
const SUMMARY_AUTO: usize = 5;
const SUMMARY_CATEGORIES: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InsightSummary {
    pub top_keywords: Vec<RankedItem>,
    pub top_colors: Vec<RankedItem>,
    pub main_price_range: Option<String>,
    pub main_price_percent: f64,
    pub top3_channels: Vec<String>,
    pub top3_ratio: f64,
    pub free_size_ratio: f64,
    pub top_sizes: Vec<RankedItem>,
    pub top_materials: Vec<String>,
    pub top_designs: Vec<String>,
    pub top_products: Vec<RankedItem>,
    pub auto_style_keywords: Vec<String>,
    pub auto_product_keywords: Vec<String>,
    pub auto_color_groups: Vec<RankedItem>,
    pub top_categories: Vec<String>,
}

impl InsightSummary {
    pub fn from_insights(insights: &Insights) -> Self {
        let dominant = dominant_band(&insights.price_ranges);
        let auto = &insights.auto_keywords;

        Self {
            top_keywords: head(&insights.product_keywords, SUMMARY_TOP),
            top_colors: head(&insights.colors, SUMMARY_TOP),
            main_price_range: dominant.map(|b| b.item.label.clone()),
            main_price_percent: dominant.map(|b| b.percent).unwrap_or(0.0),
            top3_channels: insights.channels.top3_channels.clone(),
            top3_ratio: insights.channels.top3_ratio,
            free_size_ratio: insights.sizes.free_size_ratio,
            top_sizes: insights.sizes.top_items.clone(),
            top_materials: labels(&insights.materials, SUMMARY_TOP),
            top_designs: labels(&insights.designs, SUMMARY_TOP),
            top_products: insights
                .bestsellers
                .iter()
                .take(SUMMARY_PRODUCTS)
                .map(|b| b.item.clone())
                .collect(),
            auto_style_keywords: auto.style_keywords.iter().take(SUMMARY_AUTO).cloned().collect(),
            auto_product_keywords: labels(&auto.additional_product_keywords, SUMMARY_AUTO),
            auto_color_groups: head(&auto.color_groups, SUMMARY_AUTO),
            // * Category list is already ranked by order count
            top_categories: insights
                .categories
                .iter()
                .take(SUMMARY_CATEGORIES)
                .map(|c| c.name.clone())
                .collect(),
        }
    }

    /// Human-readable one-line findings, in display order
    pub fn highlights(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(first) = self.top_keywords.first() {
            lines.push(format!("가장 많이 팔린 상품군: {} ({}건 판매)", first.label, first.count));
            if self.top_keywords.len() > 1 {
                lines.push(format!("인기 키워드: {}", labels(&self.top_keywords, SUMMARY_TOP).join(", ")));
            }
        }

        if !self.top3_channels.is_empty() {
            lines.push(format!("주요 판매 채널: {}", self.top3_channels.join(", ")));
            lines.push(format!("상위 3개 채널 점유율: {}%", self.top3_ratio));
        }

        if let Some(range) = &self.main_price_range {
            lines.push(format!("주력 가격대: {} (전체의 {:.1}%)", range, self.main_price_percent));
        }

        if !self.top_colors.is_empty() {
            lines.push(format!("인기 색상: {}", labels(&self.top_colors, SUMMARY_TOP).join(", ")));
        }

        if self.free_size_ratio > 0.0 {
            lines.push(format!("FREE 사이즈 비율: {:.1}%", self.free_size_ratio));
        }

        lines
    }
}

fn head(items: &[RankedItem], n: usize) -> Vec<RankedItem> {
    items.iter().take(n).cloned().collect()
}
