// * Recommendation guide: product and channel suggestions derived from the summary
// * No guide is produced unless keywords, colors, a dominant price band and top-3 channels all exist

use super::sales::truncate_display;
use super::summary::InsightSummary;
use crate::config::constants::GUIDE_NAME_KEEP;
use crate::config::Vocabulary;
use crate::refinery::ranked::labels;
use crate::refinery::RankedItem;
use serde::Serialize;

const GUIDE_KEYWORDS: usize = 4;
const GUIDE_RECOMMENDATIONS: usize = 3;
const GUIDE_BESTSELLERS: usize = 2;
const GUIDE_CHANNELS: usize = 3;

/// Product suggestion for one sales channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelProduct {
    pub channel: String,
    pub products: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationGuide {
    pub recommended_products: Vec<String>,
    pub top_colors: Vec<RankedItem>,
    pub free_size_ratio: f64,
    pub channels: Vec<String>,
    pub main_price_range: String,
    pub main_price_percent: f64,
    pub product_keywords: Vec<String>,
    pub design_keywords: Vec<String>,
    pub material_keywords: Vec<String>,
    /// Clustered style keywords, or the vocabulary's fit keywords when clustering found none
    pub fit_style_keywords: Vec<String>,
    pub color_keywords: Vec<String>,
    pub channel_products: Vec<ChannelProduct>,
    pub auto_product_keywords: Vec<String>,
    pub auto_style_keywords: Vec<String>,
    pub auto_color_groups: Vec<String>,
    pub top_categories: Vec<String>,
}

/// Derives the guide, or `None` when the summary lacks any required section
pub fn generate_guide(summary: &InsightSummary, vocabulary: &Vocabulary) -> Option<RecommendationGuide> {
    let complete = !summary.top_keywords.is_empty()
        && !summary.top_colors.is_empty()
        && !summary.top3_channels.is_empty();
    let main_price_range = match summary.main_price_range.as_deref() {
        Some(range) if complete && !range.is_empty() => range.to_string(),
        _ => {
            tracing::info!(
                keywords = summary.top_keywords.len(),
                colors = summary.top_colors.len(),
                price_range = summary.main_price_range.is_some(),
                channels = summary.top3_channels.len(),
                "Guide skipped: required summary sections missing"
            );
            return None;
        }
    };

    let keywords = labels(&summary.top_keywords, GUIDE_KEYWORDS);
    let styles = &summary.auto_style_keywords;

    let mut recommended_products =
        recommend_products(styles, &keywords, &summary.top_designs, &summary.top_materials);
    recommended_products.extend(
        summary
            .top_products
            .iter()
            .take(GUIDE_BESTSELLERS)
            .map(|p| format!("{} ({}건)", truncate_display(&p.label, GUIDE_NAME_KEEP, GUIDE_NAME_KEEP), p.count)),
    );

    let fit_style_keywords = if styles.is_empty() {
        vocabulary.fit_keywords().to_vec()
    } else {
        styles.clone()
    };

    Some(RecommendationGuide {
        recommended_products,
        top_colors: summary.top_colors.clone(),
        free_size_ratio: summary.free_size_ratio,
        channels: summary.top3_channels.clone(),
        main_price_range,
        main_price_percent: summary.main_price_percent,
        channel_products: channel_products(&summary.top3_channels, &keywords, &summary.top_designs, styles),
        product_keywords: keywords,
        design_keywords: summary.top_designs.iter().take(3).cloned().collect(),
        material_keywords: summary.top_materials.iter().take(3).cloned().collect(),
        fit_style_keywords,
        color_keywords: labels(&summary.top_colors, 3),
        auto_product_keywords: summary.auto_product_keywords.clone(),
        auto_style_keywords: styles.clone(),
        auto_color_groups: labels(&summary.auto_color_groups, summary.auto_color_groups.len()),
        top_categories: summary.top_categories.clone(),
    })
}

/// Style-keyword pairings; falls back to design + material + keyword when no pairing exists
pub fn recommend_products(
    styles: &[String],
    keywords: &[String],
    designs: &[String],
    materials: &[String],
) -> Vec<String> {
    let paired: Vec<String> = styles
        .iter()
        .zip(keywords)
        .take(GUIDE_RECOMMENDATIONS)
        .map(|(style, keyword)| format!("{} {}", style, keyword))
        .collect();
    if !paired.is_empty() {
        return paired;
    }

    let (Some(design), Some(material), Some(keyword)) = (designs.first(), materials.first(), keywords.first())
    else {
        return Vec::new();
    };

    let mut products = vec![format!("{} {} {}", design, material, keyword)];
    products.extend(
        designs
            .iter()
            .zip(keywords)
            .skip(1)
            .take(GUIDE_RECOMMENDATIONS - 1)
            .map(|(design, keyword)| format!("{} {}", design, keyword)),
    );
    products
}

/// Keyword pairs for the top three channels; needs three channels and three keywords
pub fn channel_products(
    channels: &[String],
    keywords: &[String],
    designs: &[String],
    styles: &[String],
) -> Vec<ChannelProduct> {
    if channels.len() < GUIDE_CHANNELS || keywords.len() < 3 {
        return Vec::new();
    }

    let (k0, k1, k2) = (&keywords[0], &keywords[1], &keywords[2]);
    let design = designs.first().map(String::as_str).unwrap_or("");

    let mut products = vec![
        format!("{}/{} 중심", k0, k1),
        format!("{}/{} 위주", k1, k2),
        format!("{} {}/{}", design, k0, k2).trim().to_string(),
    ];
    if styles.len() >= 2 {
        products[0] = format!("{} {}/{}", styles[0], k0, k1);
        products[1] = format!("{} {}/{}", styles[1], k1, k2);
    }

    channels
        .iter()
        .take(GUIDE_CHANNELS)
        .zip(products)
        .map(|(channel, products)| ChannelProduct {
            channel: channel.clone(),
            products,
        })
        .collect()
}
