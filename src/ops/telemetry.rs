// * Telemetry: structured JSON logging through tracing
// * RUST_LOG takes precedence over the level passed in

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// * Default filter when RUST_LOG is unset
const DEFAULT_LEVEL: &str = "info";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initializes the tracing subscriber with JSON formatting
///
/// # Example
/// ```ignore
/// use order_insights::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(records = 120, "Assembling insights");
/// ```
pub fn init_tracing() {
    init_tracing_with_level(DEFAULT_LEVEL);
}

/// Initializes tracing with custom log level
pub fn init_tracing_with_level(level: &str) {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty() {
    tracing_subscriber::registry()
        .with(env_filter("debug"))
        .with(fmt::layer().pretty().with_writer(std::io::stderr))
        .init();
}
