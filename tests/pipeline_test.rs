use chrono::{NaiveDate, NaiveDateTime};
use order_insights::config::Vocabulary;
use order_insights::dataset::{load_json_str, Dataset, OrderRecord};
use order_insights::engine::{analyze, AssemblerConfig, InsightAssembler, Insights};
use order_insights::refinery::{is_ranked, FrequencyKeywordExtractor, RankedItem, TextNormalizer};
use order_insights::Column;
use serde_json::json;

// * End-to-end tests over the full analysis pipeline

fn paid(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, day)
        .and_then(|d| d.and_hms_opt(14, 0, 0))
        .unwrap()
}

fn store_export() -> Dataset {
    let rows = [
        ("린넨 오버핏 셔츠", "네이비/FREE", 29_000.0, "A몰", "0001000100010001"),
        ("린넨 오버핏 셔츠", "블랙/FREE", 29_000.0, "A몰", "0001000100010001"),
        ("린넨 오버핏 셔츠", "화이트/FREE", 29_000.0, "B몰", "0001000100010001"),
        ("린넨 스트라이프 셔츠", "네이비/M", 32_000.0, "A몰", "0001000100010001"),
        ("린넨 스트라이프 셔츠", "네이비/L", 32_000.0, "C몰", "0001000100010001"),
        ("와이드 데님 팬츠", "연청/S", 45_000.0, "B몰", "0001000100070002"),
        ("와이드 데님 팬츠", "중청/M", 45_000.0, "A몰", "0001000100070002"),
        ("와이드 데님 팬츠", "진청/L", 45_000.0, "C몰", "0001000100070002"),
        ("와이드 데님 팬츠", "연청/M", 45_000.0, "D몰", "0001000100070002"),
        ("와이드 체크 팬츠", "그레이/FREE", 39_000.0, "A몰", "0001000100070002"),
        ("코튼 크롭 티셔츠", "화이트/FREE", 15_000.0, "B몰", "0001000100020002"),
        ("코튼 크롭 티셔츠", "블랙/FREE", 15_000.0, "A몰", "0001000100020002"),
    ];

    Dataset::from_records(
        rows.iter()
            .enumerate()
            .map(|(i, (name, option, price, channel, category))| {
                OrderRecord::new(paid(i as u32 + 1), *name)
                    .with_option(*option)
                    .with_price(*price)
                    .with_channel(*channel)
                    .with_category(*category)
            })
            .collect(),
    )
}

fn all_ranked(insights: &Insights) -> bool {
    let price_items: Vec<RankedItem> = insights.bestsellers.iter().map(|b| b.item.clone()).collect();
    let category_items: Vec<RankedItem> = insights.categories.iter().map(|c| c.item.clone()).collect();

    is_ranked(&insights.channels.top_channels)
        && is_ranked(&category_items)
        && is_ranked(&insights.product_keywords)
        && is_ranked(&insights.colors)
        && is_ranked(&insights.sizes.top_items)
        && is_ranked(&insights.materials)
        && is_ranked(&insights.designs)
        && is_ranked(&price_items)
        && is_ranked(&insights.auto_keywords.additional_product_keywords)
        && is_ranked(&insights.auto_keywords.color_groups)
}

#[test]
fn test_frequency_scenario() {
    let names = [
        "Oversized Black Cotton Crewneck",
        "Black Cotton Crewneck",
        "Navy Linen Shirt",
        "Navy Linen Shirt",
        "Navy Linen Shirt",
    ];
    let dataset = Dataset::from_records(names.iter().map(|n| OrderRecord::new(paid(1), *n)).collect());

    let ranked = FrequencyKeywordExtractor::new(TextNormalizer::default()).extract(&dataset, Column::ProductName, 20);

    let top: Vec<(&str, usize)> = ranked.iter().take(6).map(|i| (i.label.as_str(), i.count)).collect();
    assert_eq!(
        top,
        vec![
            ("navy", 3),
            ("linen", 3),
            ("shirt", 3),
            ("black", 2),
            ("cotton", 2),
            ("crewneck", 2),
        ]
    );
    assert!(is_ranked(&ranked));
}

#[test]
fn test_full_pipeline() {
    let vocabulary = Vocabulary::default();
    let report = analyze(&store_export(), &vocabulary, AssemblerConfig::default());
    let insights = &report.insights;

    assert_eq!(insights.start_date, "2024년 04월 01일");
    assert_eq!(insights.end_date, "2024년 04월 12일");

    assert_eq!(insights.channels.top3_channels, vec!["A몰", "B몰", "C몰"]);
    assert_eq!(insights.channels.total_orders, 12);
    assert_eq!(insights.channels.top3_ratio, 91.7);

    assert_eq!(insights.colors[0], RankedItem::new("네이비", 3));
    assert_eq!(insights.sizes.top_items[0], RankedItem::new("FREE", 6));
    assert!((insights.sizes.free_size_ratio - 50.0).abs() < 1e-9);

    assert_eq!(insights.product_keywords[0], RankedItem::new("린넨", 5));
    assert_eq!(insights.categories[0].name, "셔츠/블라우스");
    assert_eq!(insights.bestsellers[0].item, RankedItem::new("와이드 데님 팬츠", 4));

    // * 32,000 / 39,000 / 45,000 all land in the 3~5만원 band
    let dominant = insights
        .price_ranges
        .iter()
        .max_by_key(|b| b.item.count)
        .map(|b| b.item.label.as_str());
    assert_eq!(dominant, Some("3~5만원"));

    assert!(all_ranked(insights));

    let guide = report.guide.expect("guide should pass the gate");
    assert_eq!(guide.channels, vec!["A몰", "B몰", "C몰"]);
    assert_eq!(guide.main_price_range, "3~5만원");
    assert_eq!(guide.channel_products.len(), 3);
    assert!(!guide.recommended_products.is_empty());
    assert!(!report.highlights.is_empty());
}

#[test]
fn test_idempotent_runs() {
    let vocabulary = Vocabulary::default();
    let dataset = store_export();
    let assembler = InsightAssembler::new(&vocabulary);

    let first = assembler.assemble(&dataset);
    let second = assembler.assemble(&dataset);

    assert_eq!(first, second);
    assert_eq!(first.fingerprint().unwrap(), second.fingerprint().unwrap());
}

#[test]
fn test_empty_input_closure() {
    let vocabulary = Vocabulary::default();
    let report = analyze(&Dataset::default(), &vocabulary, AssemblerConfig::default());

    assert!(report.guide.is_none());
    assert!(report.insights.channels.top_channels.is_empty());
    assert!(report.insights.colors.is_empty());
    assert!(report.insights.bestsellers.is_empty());
    assert!(report.insights.channel_prices.is_empty());
    assert_eq!(report.insights.sizes.free_size_ratio, 0.0);
}

#[test]
fn test_missing_columns_only_empty_their_sections() {
    let vocabulary = Vocabulary::default();
    let export = json!([
        {"결제일": "2024-04-01 10:00:00", "상품명": "린넨 셔츠"},
        {"결제일": "2024-04-02 10:00:00", "상품명": "린넨 셔츠"},
    ]);
    let dataset = load_json_str(&export.to_string(), &vocabulary).unwrap();

    let insights = InsightAssembler::new(&vocabulary).assemble(&dataset);

    assert_eq!(insights.product_keywords[0], RankedItem::new("린넨", 2));
    assert_eq!(insights.bestsellers[0].item, RankedItem::new("린넨 셔츠", 2));
    assert!(insights.colors.is_empty());
    assert!(insights.price_ranges.is_empty());
    assert!(insights.channels.top3_channels.is_empty());
}

#[test]
fn test_report_json_sections() {
    let vocabulary = Vocabulary::default();
    let report = analyze(&store_export(), &vocabulary, AssemblerConfig::default());
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    for section in [
        "channels",
        "categories",
        "product_keywords",
        "colors",
        "sizes",
        "materials",
        "designs",
        "price_ranges",
        "bestsellers",
        "channel_prices",
        "auto_keywords",
        "start_date",
        "end_date",
    ] {
        assert!(value["insights"].get(section).is_some(), "missing section {}", section);
    }
    assert!(value["insights"]["auto_keywords"].get("style_keywords").is_some());
    assert!(value["guide"].is_object());
}
