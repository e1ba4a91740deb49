// * Configuration Constants
// * Central location for all thresholds used by the extraction pipeline

// * Top-N cut for curated attribute rankings (colors, sizes, materials, designs)
pub const ATTRIBUTE_TOP_N: usize = 10;

// * Top-N cut for raw frequency keywords from product names
pub const FREQUENCY_TOP_N: usize = 20;

// * Minimum token length (chars) for frequency keywords
pub const MIN_TOKEN_CHARS: usize = 2;

// * TF-IDF vectorizer bounds
pub const TFIDF_MAX_FEATURES: usize = 100;
pub const TFIDF_MIN_DF: usize = 2;
pub const TFIDF_TOP_N: usize = 15;

// * Category groups smaller than this are skipped by stratified TF-IDF
pub const TFIDF_MIN_GROUP_SIZE: usize = 5;

// * Count vectorizer bounds for style clustering
pub const CLUSTER_MAX_FEATURES: usize = 200;
pub const CLUSTER_MIN_DF: usize = 3;
pub const CLUSTER_MIN_FEATURES: usize = 5;
pub const CLUSTER_COUNT: usize = 5;
pub const CLUSTER_KEYWORDS: usize = 3;

// * Average documents per cluster used to cap k
pub const DOCS_PER_CLUSTER: usize = 5;

// * K-means settings (fixed seed keeps runs reproducible)
pub const KMEANS_SEED: u64 = 42;
pub const KMEANS_MAX_ITERATIONS: usize = 300;
pub const KMEANS_RESTARTS: usize = 10;
pub const KMEANS_TOLERANCE: f64 = 1e-4;

// * Color group cut
pub const COLOR_GROUP_TOP_N: usize = 20;

// * Sales aggregate cuts
pub const CHANNEL_TOP_N: usize = 10;
pub const CONCENTRATION_CHANNELS: usize = 3;
pub const BESTSELLER_TOP_N: usize = 10;
pub const CATEGORY_TOP_N: usize = 10;

// * Bestseller display truncation (chars)
pub const DISPLAY_NAME_MAX: usize = 50;
pub const DISPLAY_NAME_KEEP: usize = 47;

// * Guide bestseller truncation (chars)
pub const GUIDE_NAME_KEEP: usize = 20;

// * Size label used for the free-size ratio
pub const FREE_SIZE_LABEL: &str = "FREE";

// * Price band lower edges (KRW); the last band is open-ended
pub const PRICE_BAND_EDGES: [f64; 9] = [
    0.0, 10_000.0, 20_000.0, 30_000.0, 50_000.0, 70_000.0, 100_000.0, 150_000.0, 200_000.0,
];

pub const PRICE_BAND_LABELS: [&str; 9] = [
    "1만원 미만",
    "1~2만원",
    "2~3만원",
    "3~5만원",
    "5~7만원",
    "7~10만원",
    "10~15만원",
    "15~20만원",
    "20만원 이상",
];

// * Analysis period formatting
pub const PERIOD_DATE_FORMAT: &str = "%Y년 %m월 %d일";
pub const PERIOD_UNKNOWN: &str = "알 수 없음";

// * Environment variable prefix for vocabulary overrides
pub const ENV_PREFIX: &str = "ORDER_INSIGHTS";
