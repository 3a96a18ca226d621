//! Extraction hooks over a parsed document
//!
//! Two independent observers walk the same document: one fires for each
//! match of the heading selector, one for each anchor in the configured
//! content region. Each match is delivered to the [`PageSink`] as its own
//! callback, so the aggregator sees titles and links in whatever order the
//! document yields them.

use crate::aggregate::PageSink;
use crate::config::SelectorConfig;
use crate::url::resolve_link;
use crate::ConfigError;
use scraper::{Html, Selector};
use url::Url;

/// Compiled selector set driving the extraction hooks
#[derive(Debug, Clone)]
pub struct PageSelectors {
    title: Selector,
    title_text: Option<Selector>,
    links: Selector,
}

impl PageSelectors {
    /// Compiles the configured selector strings
    ///
    /// Validation already checked these compile, so failures here only
    /// occur for configs built programmatically with bad selectors.
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        let title = Selector::parse(&config.title).map_err(|e| {
            ConfigError::InvalidSelector(format!("title selector '{}': {}", config.title, e))
        })?;

        let title_text = match &config.title_text {
            Some(raw) => Some(Selector::parse(raw).map_err(|e| {
                ConfigError::InvalidSelector(format!("title-text selector '{}': {}", raw, e))
            })?),
            None => None,
        };

        let links = Selector::parse(&config.links).map_err(|e| {
            ConfigError::InvalidSelector(format!("links selector '{}': {}", config.links, e))
        })?;

        Ok(Self {
            title,
            title_text,
            links,
        })
    }
}

/// Parses a page body and fires the title and link observers
///
/// Title observer: for each heading match, the title text comes from the
/// first `title-text` sub-element when one is configured, otherwise from
/// the heading itself. Empty extracted text does not fire the callback.
///
/// Link observer: each anchor's href is resolved to an absolute URL against
/// the page's own URL; unresolvable or empty hrefs are discarded silently.
pub fn scan_document(body: &str, page_url: &Url, selectors: &PageSelectors, sink: &dyn PageSink) {
    let document = Html::parse_document(body);
    let page = page_url.as_str();

    for heading in document.select(&selectors.title) {
        let text = match &selectors.title_text {
            Some(sub) => heading
                .select(sub)
                .next()
                .map(|el| el.text().collect::<String>())
                .unwrap_or_default(),
            None => heading.text().collect::<String>(),
        };

        let text = text.trim();
        if !text.is_empty() {
            sink.on_title(page, text);
        }
    }

    for anchor in document.select(&selectors.links) {
        if let Some(href) = anchor.value().attr("href") {
            if let Some(absolute) = resolve_link(page_url, href) {
                sink.on_link(page, &absolute);
            }
        }
    }
}
