//! URL handling for linkslate
//!
//! Link resolution against a page's own URL and domain extraction for
//! rate-limit keying.

use url::Url;

/// Resolves a candidate href to an absolute URL and validates it
///
/// Returns `None` when the link should be discarded:
/// - empty or whitespace-only hrefs
/// - fragment-only links (same-page anchors)
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - hrefs that fail to resolve against the base
/// - non-HTTP(S) URLs after resolution
///
/// Discards are silent: an unresolvable href is not an error.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Extracts the domain of a URL for per-domain rate limiting
///
/// The host is lowercased and a leading `www.` is stripped so that
/// `www.example.com` and `example.com` share one rate-limit slot.
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    })
}
