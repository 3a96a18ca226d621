//! Shared crawl state: the title index, the link list, and reconciliation
//!
//! The title and link observers fire independently, from any worker, in no
//! guaranteed order. Both feed into the [`Aggregator`], which owns the two
//! collections behind a single mutex so that neither can be observed in a
//! half-updated state. A link appended before its page's title arrives gets
//! an optimistic (possibly empty) title; [`reconcile`] corrects every record
//! from the final title index once the crawl has drained.

use std::collections::HashMap;
use std::sync::Mutex;

/// Title used for records whose page never produced a title
pub const UNKNOWN_TITLE: &str = "unknown title";

/// One row of the final export: a link seen on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// URL of the page the link was found on
    pub page_url: String,

    /// Title of that page; filled optimistically at append time and
    /// rewritten from the title index during reconciliation
    pub page_title: String,

    /// Absolute URL of the link itself
    pub link_url: String,
}

/// Callback seam between the fetch workers and the aggregator
///
/// The fetcher invokes these zero or more times per visited page, possibly
/// from distinct workers and in unspecified relative order. Implementations
/// must be safe to call concurrently.
pub trait PageSink: Send + Sync {
    /// A title was extracted for `page_url`
    fn on_title(&self, page_url: &str, title: &str);

    /// An absolute outbound link was extracted from `page_url`
    fn on_link(&self, page_url: &str, link_url: &str);

    /// Fetching or reading `page_url` failed; the run continues
    fn on_fetch_error(&self, page_url: &str, error: &str);
}

#[derive(Debug, Default)]
struct Shared {
    titles: HashMap<String, String>,
    links: Vec<LinkRecord>,
    pages_failed: u64,
}

/// Thread-safe accumulator for titles and links discovered during the crawl
///
/// Both collections live behind one lock: a single upsert or append is the
/// whole critical section, so their keys stay mutually consistent at every
/// observation point between calls.
#[derive(Debug, Default)]
pub struct Aggregator {
    shared: Mutex<Shared>,
}

impl Aggregator {
    /// Creates an empty aggregator
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts the title for a page; last write wins
    pub fn record_title(&self, page_url: &str, title: &str) {
        let mut shared = self.shared.lock().unwrap();
        shared
            .titles
            .insert(page_url.to_string(), title.to_string());
    }

    /// Appends a link record, filling the title optimistically from the
    /// current index. Empty links are rejected as a no-op; everything else
    /// is kept unconditionally.
    pub fn record_link(&self, page_url: &str, link_url: &str) {
        if link_url.is_empty() {
            return;
        }

        let mut shared = self.shared.lock().unwrap();
        let page_title = shared.titles.get(page_url).cloned().unwrap_or_default();
        shared.links.push(LinkRecord {
            page_url: page_url.to_string(),
            page_title,
            link_url: link_url.to_string(),
        });
    }

    /// Number of link records collected so far
    pub fn link_count(&self) -> usize {
        self.shared.lock().unwrap().links.len()
    }

    /// Number of pages whose fetch failed
    pub fn pages_failed(&self) -> u64 {
        self.shared.lock().unwrap().pages_failed
    }

    /// Takes the accumulated title index and link records out of the
    /// aggregator. Call only after the wait barrier: the crawl must be
    /// fully drained before the collections are read for reconciliation.
    pub fn drain(&self) -> (HashMap<String, String>, Vec<LinkRecord>) {
        let mut shared = self.shared.lock().unwrap();
        (
            std::mem::take(&mut shared.titles),
            std::mem::take(&mut shared.links),
        )
    }
}

impl PageSink for Aggregator {
    fn on_title(&self, page_url: &str, title: &str) {
        tracing::info!("Title for {}: {}", page_url, title);
        self.record_title(page_url, title);
    }

    fn on_link(&self, page_url: &str, link_url: &str) {
        self.record_link(page_url, link_url);
    }

    fn on_fetch_error(&self, _page_url: &str, _error: &str) {
        let mut shared = self.shared.lock().unwrap();
        shared.pages_failed += 1;
    }
}

/// Rewrites every record's title from the final title index
///
/// Records whose page has an index entry get exactly that title; the rest
/// get [`UNKNOWN_TITLE`]. No record is dropped. Deterministic and
/// idempotent: a second pass over unchanged input changes nothing. Runs
/// lock-free, strictly after the crawl's wait barrier.
pub fn reconcile(records: &mut [LinkRecord], titles: &HashMap<String, String>) {
    for record in records.iter_mut() {
        record.page_title = match titles.get(&record.page_url) {
            Some(title) => title.clone(),
            None => UNKNOWN_TITLE.to_string(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_title_upsert_last_wins() {
        let agg = Aggregator::new();
        agg.record_title("https://a.example/", "First");
        agg.record_title("https://a.example/", "Second");

        let (titles, _) = agg.drain();
        assert_eq!(titles.get("https://a.example/").map(String::as_str), Some("Second"));
    }

    #[test]
    fn test_record_link_rejects_empty() {
        let agg = Aggregator::new();
        agg.record_link("https://a.example/", "");
        assert_eq!(agg.link_count(), 0);
    }

    #[test]
    fn test_optimistic_fill_when_title_known() {
        let agg = Aggregator::new();
        agg.record_title("https://a.example/", "Alpha");
        agg.record_link("https://a.example/", "https://x.example/1");

        let (_, links) = agg.drain();
        assert_eq!(links[0].page_title, "Alpha");
    }

    #[test]
    fn test_optimistic_fill_empty_when_title_unknown() {
        let agg = Aggregator::new();
        agg.record_link("https://a.example/", "https://x.example/1");

        let (_, links) = agg.drain();
        assert_eq!(links[0].page_title, "");
    }

    #[test]
    fn test_reconcile_fills_known_title() {
        let agg = Aggregator::new();
        agg.record_link("https://a.example/", "https://x.example/1");
        agg.record_title("https://a.example/", "Alpha");

        let (titles, mut links) = agg.drain();
        reconcile(&mut links, &titles);
        assert_eq!(links[0].page_title, "Alpha");
    }

    #[test]
    fn test_reconcile_sets_sentinel_for_missing_title() {
        let agg = Aggregator::new();
        agg.record_link("https://b.example/", "https://x.example/2");

        let (titles, mut links) = agg.drain();
        reconcile(&mut links, &titles);
        assert_eq!(links[0].page_title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut titles = HashMap::new();
        titles.insert("https://a.example/".to_string(), "Alpha".to_string());

        let mut records = vec![
            LinkRecord {
                page_url: "https://a.example/".to_string(),
                page_title: String::new(),
                link_url: "https://x.example/1".to_string(),
            },
            LinkRecord {
                page_url: "https://b.example/".to_string(),
                page_title: String::new(),
                link_url: "https://x.example/2".to_string(),
            },
        ];

        reconcile(&mut records, &titles);
        let first_pass = records.clone();
        reconcile(&mut records, &titles);
        assert_eq!(records, first_pass);
    }

    #[test]
    fn test_title_link_order_independence() {
        // Title before link
        let agg1 = Aggregator::new();
        agg1.record_title("https://a.example/", "Alpha");
        agg1.record_link("https://a.example/", "https://x.example/1");
        let (titles1, mut links1) = agg1.drain();
        reconcile(&mut links1, &titles1);

        // Link before title
        let agg2 = Aggregator::new();
        agg2.record_link("https://a.example/", "https://x.example/1");
        agg2.record_title("https://a.example/", "Alpha");
        let (titles2, mut links2) = agg2.drain();
        reconcile(&mut links2, &titles2);

        assert_eq!(links1, links2);
    }

    #[test]
    fn test_no_record_dropped_after_reconcile() {
        let agg = Aggregator::new();
        agg.record_title("https://a.example/", "Alpha");
        for i in 0..10 {
            agg.record_link("https://a.example/", &format!("https://x.example/{}", i));
            agg.record_link("https://b.example/", &format!("https://y.example/{}", i));
        }

        let (titles, mut links) = agg.drain();
        reconcile(&mut links, &titles);

        assert_eq!(links.len(), 20);
        assert!(links.iter().all(|r| !r.page_title.is_empty()));
    }

    #[test]
    fn test_fetch_error_counted() {
        let agg = Aggregator::new();
        agg.on_fetch_error("https://down.example/", "connection refused");
        agg.on_fetch_error("https://gone.example/", "HTTP 500");
        assert_eq!(agg.pages_failed(), 2);
    }

    #[test]
    fn test_concurrent_callbacks_keep_every_link() {
        use std::sync::Arc;

        let agg = Arc::new(Aggregator::new());
        let mut handles = Vec::new();

        for worker in 0..4 {
            let agg = Arc::clone(&agg);
            handles.push(std::thread::spawn(move || {
                let page = format!("https://page{}.example/", worker);
                for i in 0..50 {
                    agg.record_link(&page, &format!("https://x.example/{}/{}", worker, i));
                }
                agg.record_title(&page, &format!("Page {}", worker));
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let (titles, mut links) = agg.drain();
        reconcile(&mut links, &titles);

        assert_eq!(links.len(), 200);
        assert!(links.iter().all(|r| r.page_title.starts_with("Page ")));
    }
}
