use serde::Deserialize;

/// Main configuration structure for linkslate
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
    /// The fixed, ordered list of seed URLs to visit
    pub seeds: Vec<String>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    pub parallelism: u32,

    /// Minimum time between requests to the same domain (milliseconds)
    #[serde(rename = "domain-delay-ms")]
    pub domain_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Selectors driving the two extraction hooks
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// CSS selector for the page's primary heading
    pub title: String,

    /// Optional sub-element selector whose text becomes the title;
    /// when absent the heading's own text is used
    #[serde(rename = "title-text", default)]
    pub title_text: Option<String>,

    /// CSS selector for anchors within the designated content region
    pub links: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path of the append-only diagnostic log
    #[serde(rename = "log-path")]
    pub log_path: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("linkslate/{}", env!("CARGO_PKG_VERSION"))
}
