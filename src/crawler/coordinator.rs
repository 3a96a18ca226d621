//! Crawl coordinator - worker pool orchestration
//!
//! Drives the fixed seed list through a bounded pool of fetch workers:
//! - one task per seed, gated by a semaphore sized to the parallelism bound
//! - per-domain minimum delay before each request
//! - per-page failures absorbed (logged + error callback), never fatal
//! - draining the task set is the wait barrier; reconciliation runs
//!   strictly after it

use crate::aggregate::{reconcile, Aggregator, LinkRecord, PageSink};
use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::limiter::DomainLimiter;
use crate::crawler::observer::{scan_document, PageSelectors};
use crate::url::extract_domain;
use crate::SlateError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Final result of a crawl run, reconciled and ready for export
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Every collected link record, titles reconciled
    pub records: Vec<LinkRecord>,

    /// Number of seed pages whose fetch failed
    pub pages_failed: u64,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    selectors: Arc<PageSelectors>,
    limiter: Arc<DomainLimiter>,
    aggregator: Arc<Aggregator>,
}

impl Coordinator {
    /// Creates a new coordinator from a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(SlateError)` - Failed to build the HTTP client or selectors
    pub fn new(config: Config) -> Result<Self, SlateError> {
        let client = build_http_client(
            &config.crawler.user_agent,
            config.crawler.request_timeout_secs,
        )?;
        let selectors = Arc::new(PageSelectors::compile(&config.selectors)?);
        let limiter = Arc::new(DomainLimiter::new(Duration::from_millis(
            config.crawler.domain_delay_ms,
        )));

        Ok(Self {
            config: Arc::new(config),
            client,
            selectors,
            limiter,
            aggregator: Arc::new(Aggregator::new()),
        })
    }

    /// Runs the crawl: visits every seed, waits for the pool to drain,
    /// then reconciles the collected records
    ///
    /// A single page's failure never aborts the run; it is logged, counted,
    /// and simply yields no records for that page.
    pub async fn run(&self) -> Result<CrawlOutcome, SlateError> {
        tracing::info!(
            "Starting crawl: {} seeds, parallelism {}",
            self.config.seeds.len(),
            self.config.crawler.parallelism
        );

        let semaphore = Arc::new(Semaphore::new(self.config.crawler.parallelism as usize));
        let mut workers: JoinSet<()> = JoinSet::new();

        for seed in &self.config.seeds {
            // Seeds were validated at config load; absorb anyway so one bad
            // entry cannot take the run down.
            let url = match Url::parse(seed) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Failed to visit {}: {}", seed, e);
                    self.aggregator.on_fetch_error(seed, &e.to_string());
                    continue;
                }
            };

            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let selectors = Arc::clone(&self.selectors);
            let limiter = Arc::clone(&self.limiter);
            let aggregator = Arc::clone(&self.aggregator);

            workers.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };

                visit_page(&client, &selectors, &limiter, aggregator.as_ref(), &url).await;
            });
        }

        // Wait barrier: reconciliation must not start while any fetch is in
        // flight or queued.
        while workers.join_next().await.is_some() {}

        let pages_failed = self.aggregator.pages_failed();
        let (titles, mut records) = self.aggregator.drain();
        reconcile(&mut records, &titles);

        tracing::info!(
            "Crawl drained: {} link records, {} pages failed",
            records.len(),
            pages_failed
        );

        Ok(CrawlOutcome {
            records,
            pages_failed,
        })
    }
}

/// Visits a single page: rate-limit wait, one fetch attempt, then the
/// extraction callbacks over the parsed body
async fn visit_page(
    client: &Client,
    selectors: &PageSelectors,
    limiter: &DomainLimiter,
    sink: &dyn PageSink,
    url: &Url,
) {
    tracing::info!("Visiting {}", url);

    let domain = extract_domain(url).unwrap_or_else(|| url.as_str().to_string());
    limiter.wait_turn(&domain).await;

    match fetch_page(client, url.as_str()).await {
        FetchOutcome::Success { body } => {
            scan_document(&body, url, selectors, sink);
        }
        FetchOutcome::HttpStatus { status } => {
            let error = format!("HTTP {}", status);
            tracing::warn!("Failed to visit {}: {}", url, error);
            sink.on_fetch_error(url.as_str(), &error);
        }
        FetchOutcome::Network { error } => {
            tracing::warn!("Failed to visit {}: {}", url, error);
            sink.on_fetch_error(url.as_str(), &error);
        }
    }
}

/// Runs a complete crawl with a fresh coordinator
pub async fn run_crawl(config: Config) -> Result<CrawlOutcome, SlateError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
