//! Crawler module for seed page fetching and extraction
//!
//! This module contains the crawl machinery:
//! - HTTP fetching (single attempt per seed)
//! - Per-domain rate limiting
//! - Selector-driven extraction callbacks
//! - Worker pool coordination with a wait-for-drain barrier

mod coordinator;
mod fetcher;
mod limiter;
mod observer;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use limiter::DomainLimiter;
pub use observer::{scan_document, PageSelectors};

use crate::config::Config;
use crate::SlateError;

/// Runs a complete crawl operation
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP client and compile the extraction selectors
/// 2. Dispatch one bounded worker per seed URL
/// 3. Fire the title and link observers for every fetched page
/// 4. Wait for the pool to drain
/// 5. Reconcile every link record against the final title index
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Reconciled records plus failure count
/// * `Err(SlateError)` - Setup failed before any page was visited
pub async fn crawl(config: Config) -> Result<CrawlOutcome, SlateError> {
    run_crawl(config).await
}
