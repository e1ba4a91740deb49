use order_insights::config::Vocabulary;
use order_insights::dataset::{load_json_file, Column, DatasetLoader};
use order_insights::InsightError;
use serde_json::json;

// * Ingestion of JSON order exports

#[test]
fn test_korean_headers_and_aliases() {
    let vocabulary = Vocabulary::default();
    let export = json!([
        {"결제일": "2024-05-01 09:15:00", "상품명": "린넨 셔츠", "상품가격": "29,000", "판매채널": "A몰"},
        {"payment_date": "2024/05/02 10:00", "product_name": "데님 팬츠", "price": 45000, "channel": "B몰"},
    ]);

    let (dataset, stats) = DatasetLoader::new(&vocabulary).load_str(&export.to_string()).unwrap();

    assert_eq!(stats.rows_kept, 2);
    assert_eq!(dataset.records()[0].price, Some(29_000.0));
    assert_eq!(dataset.records()[1].price, Some(45_000.0));
    assert!(dataset.has_column(Column::Channel));
    assert!(!dataset.has_column(Column::OptionInfo));
}

#[test]
fn test_garbage_cells_become_missing() {
    let vocabulary = Vocabulary::default();
    let export = json!([
        {"결제일": "2024-05-01", "상품명": "셔츠", "상품가격": "문의"},
        {"결제일": "어제", "상품명": "팬츠"},
        {"결제일": "2024-05-03", "상품명": "   "},
    ]);

    let (dataset, stats) = DatasetLoader::new(&vocabulary).load_str(&export.to_string()).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].price, None);
    assert_eq!(stats.dropped_invalid, 2);
    // * The column was present even though no value survived coercion
    assert!(dataset.has_column(Column::Price));
}

#[test]
fn test_duplicates_by_order_and_product() {
    let vocabulary = Vocabulary::default();
    let export = json!([
        {"결제일": "2024-05-01", "상품명": "셔츠", "주문번호": "1", "상품번호": "10"},
        {"결제일": "2024-05-01", "상품명": "셔츠", "주문번호": "1", "상품번호": "10"},
        {"결제일": "2024-05-01", "상품명": "팬츠", "주문번호": "1", "상품번호": "11"},
    ]);

    let (dataset, stats) = DatasetLoader::new(&vocabulary).load_str(&export.to_string()).unwrap();

    assert_eq!(dataset.len(), 2);
    assert_eq!(stats.dropped_duplicates, 1);
}

#[test]
fn test_allowlist_from_environment_lookup() {
    let vocabulary = Vocabulary::from_lookup(|name| match name {
        "ORDER_INSIGHTS_CATEGORY_ALLOWLIST" => Some("0001000100020002".to_string()),
        _ => None,
    });
    let export = json!([
        {"결제일": "2024-05-01", "상품명": "티셔츠", "상품 카테고리": "0001000100020002"},
        {"결제일": "2024-05-01", "상품명": "립스틱", "상품 카테고리": "0011000700020001"},
    ]);

    let (dataset, stats) = DatasetLoader::new(&vocabulary).load_str(&export.to_string()).unwrap();

    assert_eq!(dataset.len(), 1);
    assert_eq!(stats.dropped_category, 1);
}

#[test]
fn test_rejects_non_array() {
    let vocabulary = Vocabulary::default();
    let result = DatasetLoader::new(&vocabulary).load_str(r#"{"상품명": "셔츠"}"#);
    assert!(matches!(result, Err(InsightError::InvalidInput(_))));

    let result = DatasetLoader::new(&vocabulary).load_str("not json");
    assert!(matches!(result, Err(InsightError::Json(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let vocabulary = Vocabulary::default();
    let result = load_json_file(std::path::Path::new("/nonexistent/orders.json"), &vocabulary);
    assert!(matches!(result, Err(InsightError::Io(_))));
}
