// * Vocabulary: curated keyword lists and category names
// * Built once at startup from defaults plus environment overrides, read-only afterwards

use crate::config::constants::ENV_PREFIX;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const DEFAULT_STOP_WORDS: &[&str] = &[
    "1+1", "기획", "특가", "세트", "쿠폰", "할인", "단독", "주문", "폭주", "배송", "당일", "브리치",
    "[브리치]", "color", "ver", "개", "세트", "택1", "선택", "ver.", "버전", "모음", "컬러", "col",
    "쇼핑몰", "인기", "best", "컬렉션", "쿠폰다운", "%", "주문폭주", "만원", "천장돌파",
];

const DEFAULT_COLORS: &[&str] = &[
    "블랙", "화이트", "아이보리", "베이지", "그레이", "차콜", "네이비", "핑크", "블루", "퍼플", "레드",
    "그린", "옐로우", "오렌지", "브라운", "카키", "와인", "연청", "중청", "진청",
];

const DEFAULT_SIZES: &[&str] = &[
    "FREE", "XS", "S", "M", "L", "XL", "XXL", "55", "66", "77", "88", "95", "100", "105", "110",
];

const DEFAULT_MATERIALS: &[&str] = &[
    "면", "코튼", "니트", "데님", "린넨", "레이온", "폴리", "울", "캐시미어", "쉬폰", "레더",
    "스웨이드", "퍼", "벨벳", "실크", "레이스", "퀼팅", "트위드", "폴리에스테르", "텐셀", "모달",
    "스판", "와플", "자수", "시스루",
];

const DEFAULT_DESIGNS: &[&str] = &[
    "체크", "스트라이프", "도트", "플라워", "플로럴", "지브라", "레오파드", "카모", "타이다이",
    "그라데이션", "프린트", "패치", "자수", "레터링", "로고", "아가일", "기하학", "페이즐리",
];

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("0001000100080003", "니트/스웨터"),
    ("0001000100080001", "가디건"),
    ("0001000100010001", "셔츠/블라우스"),
    ("0011000700020001", "화장품"),
    ("0001000100060001", "슬랙스"),
    ("0001000100060004", "조거/트레이닝"),
    ("0001000100020002", "티셔츠"),
    ("0001000100020005", "맨투맨"),
    ("000100050010", "패션 소품"),
    ("0001000100070002", "데님 팬츠"),
];

// * Fit keywords the guide falls back to when clustering finds no style terms
const DEFAULT_FIT_KEYWORDS: &[&str] = &["와이드핏", "크롭", "핀턱"];

const DEFAULT_UNKNOWN_CATEGORY: &str = "알 수 없는 카테고리";

/// Curated attribute classes matched against option strings and product names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeClass {
    Colors,
    Sizes,
    Materials,
    Designs,
}

impl AttributeClass {
    pub const ALL: [AttributeClass; 4] = [
        AttributeClass::Colors,
        AttributeClass::Sizes,
        AttributeClass::Materials,
        AttributeClass::Designs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeClass::Colors => "colors",
            AttributeClass::Sizes => "sizes",
            AttributeClass::Materials => "materials",
            AttributeClass::Designs => "designs",
        }
    }

    /// Environment variable carrying extra comma-separated keywords for this class
    pub fn env_var(&self) -> String {
        format!("{}_EXTRA_{}", ENV_PREFIX, self.as_str().to_uppercase())
    }
}

/// Immutable keyword configuration shared by every extractor
#[derive(Debug, Clone, Serialize)]
pub struct Vocabulary {
    stop_words: Vec<String>,
    colors: Vec<String>,
    sizes: Vec<String>,
    materials: Vec<String>,
    designs: Vec<String>,
    categories: BTreeMap<String, String>,
    category_allowlist: Option<BTreeSet<String>>,
    fit_keywords: Vec<String>,
    unknown_category: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            stop_words: owned(DEFAULT_STOP_WORDS),
            colors: owned(DEFAULT_COLORS),
            sizes: owned(DEFAULT_SIZES),
            materials: owned(DEFAULT_MATERIALS),
            designs: owned(DEFAULT_DESIGNS),
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
            category_allowlist: None,
            fit_keywords: owned(DEFAULT_FIT_KEYWORDS),
            unknown_category: DEFAULT_UNKNOWN_CATEGORY.to_string(),
        }
    }
}

impl Vocabulary {
    /// Defaults extended by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults extended by an arbitrary variable lookup
    ///
    /// Every `*_EXTRA_*` variable is a comma-separated list appended to the default list.
    /// `*_CATEGORY_ALLOWLIST` restricts ingestion to the listed category codes.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut vocabulary = Self::default();

        let stop_var = format!("{}_EXTRA_STOP_WORDS", ENV_PREFIX);
        vocabulary.stop_words.extend(split_list(lookup(&stop_var)));

        for class in AttributeClass::ALL {
            let extra = split_list(lookup(&class.env_var()));
            vocabulary.list_mut(class).extend(extra);
        }

        let allow_var = format!("{}_CATEGORY_ALLOWLIST", ENV_PREFIX);
        let allowlist: BTreeSet<String> = split_list(lookup(&allow_var)).into_iter().collect();
        if !allowlist.is_empty() {
            vocabulary.category_allowlist = Some(allowlist);
        }

        vocabulary
    }

    /// Replaces the keyword list of one attribute class
    pub fn with_attribute(mut self, class: AttributeClass, keywords: &[&str]) -> Self {
        *self.list_mut(class) = owned(keywords);
        self
    }

    /// Replaces the stop-word list
    pub fn with_stop_words(mut self, stop_words: &[&str]) -> Self {
        self.stop_words = owned(stop_words);
        self
    }

    /// Restricts ingestion to the given category codes
    pub fn with_category_allowlist(mut self, codes: &[&str]) -> Self {
        self.category_allowlist = Some(codes.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn stop_words(&self) -> &[String] {
        &self.stop_words
    }

    pub fn attribute(&self, class: AttributeClass) -> &[String] {
        match class {
            AttributeClass::Colors => &self.colors,
            AttributeClass::Sizes => &self.sizes,
            AttributeClass::Materials => &self.materials,
            AttributeClass::Designs => &self.designs,
        }
    }

    pub fn fit_keywords(&self) -> &[String] {
        &self.fit_keywords
    }

    /// Display name for a category code; unknown codes never fail
    pub fn category_name(&self, code: &str) -> String {
        match self.categories.get(code) {
            Some(name) => name.clone(),
            None => format!("{} ({})", self.unknown_category, code),
        }
    }

    /// Whether a category code passes the optional allow-list
    pub fn is_category_allowed(&self, code: &str) -> bool {
        match &self.category_allowlist {
            Some(allowed) => allowed.contains(code),
            None => true,
        }
    }

    fn list_mut(&mut self, class: AttributeClass) -> &mut Vec<String> {
        match class {
            AttributeClass::Colors => &mut self.colors,
            AttributeClass::Sizes => &mut self.sizes,
            AttributeClass::Materials => &mut self.materials,
            AttributeClass::Designs => &mut self.designs,
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_populated() {
        let vocabulary = Vocabulary::default();

        assert!(!vocabulary.stop_words().is_empty());
        for class in AttributeClass::ALL {
            assert!(!vocabulary.attribute(class).is_empty(), "{} empty", class.as_str());
        }
        assert_eq!(vocabulary.attribute(AttributeClass::Sizes)[0], "FREE");
    }

    #[test]
    fn test_env_lists_are_appended() {
        let env: HashMap<&str, &str> = [
            ("ORDER_INSIGHTS_EXTRA_COLORS", "민트, 라벤더,"),
            ("ORDER_INSIGHTS_EXTRA_STOP_WORDS", "무배"),
        ]
        .into();

        let vocabulary = Vocabulary::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        let colors = vocabulary.attribute(AttributeClass::Colors);

        // * Defaults stay first, extras are appended in order
        assert_eq!(colors[0], "블랙");
        assert_eq!(colors[colors.len() - 2], "민트");
        assert_eq!(colors[colors.len() - 1], "라벤더");
        assert_eq!(vocabulary.stop_words().last().map(String::as_str), Some("무배"));
    }

    #[test]
    fn test_unknown_category_is_labelled() {
        let vocabulary = Vocabulary::default();

        assert_eq!(vocabulary.category_name("0001000100080001"), "가디건");
        assert_eq!(vocabulary.category_name("9999"), "알 수 없는 카테고리 (9999)");
    }

    #[test]
    fn test_allowlist() {
        let open = Vocabulary::default();
        assert!(open.is_category_allowed("anything"));

        let env: HashMap<&str, &str> = [("ORDER_INSIGHTS_CATEGORY_ALLOWLIST", "A1,B2")].into();
        let restricted = Vocabulary::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert!(restricted.is_category_allowed("A1"));
        assert!(!restricted.is_category_allowed("C3"));
    }
}
