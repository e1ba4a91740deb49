// * Thin ingestion layer: JSON rows keyed by export headers -> Dataset
// * Coerces prices and dates, drops invalid rows, removes duplicate order lines

use super::{Column, Dataset, OrderRecord};
use crate::config::Vocabulary;
use crate::errors::InsightError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

// * Accepted timestamp layouts, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y%m%d"];

/// Row accounting for one load
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadStats {
    pub rows_read: usize,
    pub dropped_invalid: usize,
    pub dropped_category: usize,
    pub dropped_duplicates: usize,
    pub rows_kept: usize,
}

/// Converts raw export rows into a Dataset
pub struct DatasetLoader<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> DatasetLoader<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Parses a JSON array of row objects
    pub fn load_str(&self, json: &str) -> Result<(Dataset, LoadStats), InsightError> {
        let value: Value = serde_json::from_str(json)?;
        let rows = match value {
            Value::Array(rows) => rows,
            _ => {
                return Err(InsightError::InvalidInput(
                    "expected a JSON array of row objects".to_string(),
                ))
            }
        };

        let mut objects = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match row {
                Value::Object(map) => objects.push(map),
                _ => {
                    return Err(InsightError::InvalidInput(format!(
                        "row {} is not an object",
                        index
                    )))
                }
            }
        }

        Ok(self.load_rows(&objects))
    }

    /// Builds a Dataset from already-parsed row objects
    pub fn load_rows(&self, rows: &[Map<String, Value>]) -> (Dataset, LoadStats) {
        let mut stats = LoadStats {
            rows_read: rows.len(),
            ..Default::default()
        };

        // * Column presence comes from the keys, not from the values
        let mut columns: BTreeSet<Column> = BTreeSet::new();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            let mut record = OrderRecord::default();
            for (key, value) in row {
                let Some(column) = Column::from_key(key) else {
                    continue;
                };
                columns.insert(column);
                apply_cell(&mut record, column, value);
            }

            if !record.is_valid() {
                stats.dropped_invalid += 1;
                continue;
            }

            if let Some(code) = record.category.as_deref() {
                if !self.vocabulary.is_category_allowed(code) {
                    stats.dropped_category += 1;
                    continue;
                }
            }

            records.push(record);
        }

        let before = records.len();
        let records = dedup_records(records, &columns);
        stats.dropped_duplicates = before - records.len();
        stats.rows_kept = records.len();

        tracing::info!(
            rows_read = stats.rows_read,
            rows_kept = stats.rows_kept,
            dropped_invalid = stats.dropped_invalid,
            dropped_category = stats.dropped_category,
            dropped_duplicates = stats.dropped_duplicates,
            "Order export loaded"
        );

        (Dataset::with_columns(records, columns), stats)
    }
}

/// Loads a JSON export from a string with the given vocabulary
pub fn load_json_str(json: &str, vocabulary: &Vocabulary) -> Result<Dataset, InsightError> {
    DatasetLoader::new(vocabulary).load_str(json).map(|(d, _)| d)
}

/// Loads a JSON export from disk with the given vocabulary
pub fn load_json_file(path: &Path, vocabulary: &Vocabulary) -> Result<Dataset, InsightError> {
    let raw = std::fs::read_to_string(path)?;
    load_json_str(&raw, vocabulary)
}

fn apply_cell(record: &mut OrderRecord, column: Column, value: &Value) {
    match column {
        Column::PaymentDate => record.payment_date = coerce_datetime(value),
        Column::Price => record.price = coerce_price(value),
        Column::ProductName => record.product_name = coerce_text(value),
        Column::OptionInfo => record.option_info = coerce_text(value),
        Column::Category => record.category = coerce_text(value),
        Column::Channel => record.channel = coerce_text(value),
        Column::OrderId => record.order_id = coerce_text(value),
        Column::ProductId => record.product_id = coerce_text(value),
        Column::Description => record.description = coerce_text(value),
    }
}

// * Keeps the first occurrence of each (order, product) pair, or each order when product ids are absent
fn dedup_records(records: Vec<OrderRecord>, columns: &BTreeSet<Column>) -> Vec<OrderRecord> {
    let by_order = columns.contains(&Column::OrderId);
    let by_product = columns.contains(&Column::ProductId);
    if !by_order {
        return records;
    }

    let mut seen: HashSet<(Option<String>, Option<String>)> = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let product = if by_product { r.product_id.clone() } else { None };
            seen.insert((r.order_id.clone(), product))
        })
        .collect()
}

pub(crate) fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn coerce_price(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|p| p.is_finite())
}

pub(crate) fn coerce_datetime(value: &Value) -> Option<NaiveDateTime> {
    let raw = match value {
        Value::String(s) => s.trim(),
        _ => return None,
    };
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_coercion() {
        assert_eq!(coerce_price(&json!(19900)), Some(19900.0));
        assert_eq!(coerce_price(&json!("29,000")), Some(29000.0));
        assert_eq!(coerce_price(&json!("무료")), None);
        assert_eq!(coerce_price(&Value::Null), None);
    }

    #[test]
    fn test_datetime_coercion() {
        assert!(coerce_datetime(&json!("2024-03-01 12:30:00")).is_some());
        assert!(coerce_datetime(&json!("2024.03.01")).is_some());
        assert!(coerce_datetime(&json!("2024-03-01T12:30:00+09:00")).is_some());
        assert!(coerce_datetime(&json!("어제")).is_none());
        assert!(coerce_datetime(&json!(20240301)).is_none());
    }

    #[test]
    fn test_invalid_rows_dropped() {
        let vocabulary = Vocabulary::default();
        let json = r#"[
            {"결제일": "2024-03-01", "상품명": "린넨 셔츠"},
            {"결제일": "", "상품명": "니트"},
            {"결제일": "2024-03-02"},
            {"payment_date": "2024-03-03", "product_name": "데님 팬츠", "price": "39000"}
        ]"#;

        let (dataset, stats) = DatasetLoader::new(&vocabulary).load_str(json).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(stats.dropped_invalid, 2);
        assert!(dataset.has_column(Column::Price));
        assert_eq!(dataset.records()[1].price, Some(39000.0));
    }

    #[test]
    fn test_duplicate_order_lines_removed() {
        let vocabulary = Vocabulary::default();
        let json = r#"[
            {"결제일": "2024-03-01", "상품명": "A", "주문번호": 1, "상품번호": 10},
            {"결제일": "2024-03-01", "상품명": "A", "주문번호": 1, "상품번호": 10},
            {"결제일": "2024-03-01", "상품명": "B", "주문번호": 1, "상품번호": 11}
        ]"#;

        let (dataset, stats) = DatasetLoader::new(&vocabulary).load_str(json).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(stats.dropped_duplicates, 1);
    }

    #[test]
    fn test_category_allowlist_applied() {
        let vocabulary = Vocabulary::default().with_category_allowlist(&["C1"]);
        let json = r#"[
            {"결제일": "2024-03-01", "상품명": "A", "상품 카테고리": "C1"},
            {"결제일": "2024-03-01", "상품명": "B", "상품 카테고리": "C2"}
        ]"#;

        let (dataset, stats) = DatasetLoader::new(&vocabulary).load_str(json).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(stats.dropped_category, 1);
    }

    #[test]
    fn test_non_array_rejected() {
        let vocabulary = Vocabulary::default();
        let result = DatasetLoader::new(&vocabulary).load_str(r#"{"상품명": "A"}"#);

        assert!(matches!(result, Err(InsightError::InvalidInput(_))));
    }
}
