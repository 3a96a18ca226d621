//! Linkslate: a seed-list link tabulator
//!
//! This crate crawls a fixed set of seed pages with bounded parallelism,
//! extracts a title and the outbound links of each page, reconciles the two
//! after the crawl drains, and exports the result as a flat CSV table.

pub mod aggregate;
pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for linkslate operations
#[derive(Debug, Error)]
pub enum SlateError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to open diagnostic log {path}: {source}")]
    LogFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Export error: {0}")]
    Export(#[from] output::ExportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for linkslate operations
pub type Result<T> = std::result::Result<T, SlateError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use aggregate::{reconcile, Aggregator, LinkRecord, PageSink, UNKNOWN_TITLE};
pub use config::Config;
pub use crawler::{crawl, CrawlOutcome};
