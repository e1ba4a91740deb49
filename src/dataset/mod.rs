// * Order dataset: the immutable, in-memory table every extractor borrows
// * Column presence is tracked separately from values so "missing column" and "empty cell" stay distinct

pub mod loader;

pub use loader::{load_json_file, load_json_str, DatasetLoader};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Columns of the order export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    PaymentDate,
    ProductName,
    OptionInfo,
    Price,
    Category,
    Channel,
    OrderId,
    ProductId,
    Description,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::PaymentDate,
        Column::ProductName,
        Column::OptionInfo,
        Column::Price,
        Column::Category,
        Column::Channel,
        Column::OrderId,
        Column::ProductId,
        Column::Description,
    ];

    /// Header used by the order export
    pub fn header(&self) -> &'static str {
        match self {
            Column::PaymentDate => "결제일",
            Column::ProductName => "상품명",
            Column::OptionInfo => "옵션정보",
            Column::Price => "상품가격",
            Column::Category => "상품 카테고리",
            Column::Channel => "판매채널",
            Column::OrderId => "주문번호",
            Column::ProductId => "상품번호",
            Column::Description => "상품상세설명",
        }
    }

    /// English alias accepted by the loader
    pub fn alias(&self) -> &'static str {
        match self {
            Column::PaymentDate => "payment_date",
            Column::ProductName => "product_name",
            Column::OptionInfo => "option_info",
            Column::Price => "price",
            Column::Category => "category",
            Column::Channel => "channel",
            Column::OrderId => "order_id",
            Column::ProductId => "product_id",
            Column::Description => "description",
        }
    }

    pub fn from_key(key: &str) -> Option<Column> {
        let key = key.trim();
        Column::ALL
            .into_iter()
            .find(|c| c.header() == key || c.alias() == key)
    }
}

/// One row of the order export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub payment_date: Option<NaiveDateTime>,
    pub product_name: Option<String>,
    pub option_info: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub channel: Option<String>,
    pub order_id: Option<String>,
    pub product_id: Option<String>,
    pub description: Option<String>,
}

impl OrderRecord {
    /// Creates a record with the two mandatory fields set
    pub fn new(payment_date: NaiveDateTime, product_name: impl Into<String>) -> Self {
        Self {
            payment_date: Some(payment_date),
            product_name: Some(product_name.into()),
            ..Default::default()
        }
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.option_info = Some(option.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_category(mut self, code: impl Into<String>) -> Self {
        self.category = Some(code.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text value of a column, if the column is textual and present
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::ProductName => self.product_name.as_deref(),
            Column::OptionInfo => self.option_info.as_deref(),
            Column::Category => self.category.as_deref(),
            Column::Channel => self.channel.as_deref(),
            Column::OrderId => self.order_id.as_deref(),
            Column::ProductId => self.product_id.as_deref(),
            Column::Description => self.description.as_deref(),
            Column::PaymentDate | Column::Price => None,
        }
    }

    /// Whether the record carries a value for the column
    pub fn has(&self, column: Column) -> bool {
        match column {
            Column::PaymentDate => self.payment_date.is_some(),
            Column::Price => self.price.is_some(),
            other => self.text(other).is_some(),
        }
    }

    /// Mandatory fields for analysis: payment date and product name
    pub fn is_valid(&self) -> bool {
        self.payment_date.is_some() && self.product_name.is_some()
    }
}

/// Ordered, immutable collection of order records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<OrderRecord>,
    columns: BTreeSet<Column>,
}

impl Dataset {
    /// Builds a dataset whose columns are the ones any record carries a value for
    pub fn from_records(records: Vec<OrderRecord>) -> Self {
        let columns = Column::ALL
            .into_iter()
            .filter(|c| records.iter().any(|r| r.has(*c)))
            .collect();
        Self { records, columns }
    }

    /// Builds a dataset with an explicit column set (columns may exist with only empty cells)
    pub fn with_columns(records: Vec<OrderRecord>, columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            records,
            columns: columns.into_iter().collect(),
        }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    /// Non-null text values of a column, in record order; empty when the column is absent
    pub fn texts(&self, column: Column) -> Vec<&str> {
        if !self.has_column(column) {
            return Vec::new();
        }
        self.records.iter().filter_map(|r| r.text(column)).collect()
    }

    /// Earliest and latest payment timestamps
    pub fn period(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut dates = self.records.iter().filter_map(|r| r.payment_date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }
}
