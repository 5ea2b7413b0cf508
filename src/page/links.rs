// src/page/links.rs
// =============================================================================
// Extracts the links a page points to.
//
// We use the `scraper` crate to parse the HTML and select every <a href>,
// and the `url` crate to resolve relative targets against the page URL.
//
// Dropped on the way:
// - placeholder anchors that go nowhere ("javascript:;", "javascript:void(0)")
// - anything that doesn't resolve to http or https (mailto:, tel:, data:, ...)
// - hrefs that can't be parsed at all
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use crate::error::ExtractError;

/// hrefs that look like links but only exist to hang a click handler on.
const PLACEHOLDER_HREFS: &[&str] = &["javascript:;", "javascript:void(0)"];

/// Returns the absolute URL of every anchor in `html`, in document order.
///
/// `base_url` must be absolute; relative hrefs are resolved against it.
pub fn extract_links(html: &str, base_url: &str) -> Result<Vec<String>, ExtractError> {
    let base = Url::parse(base_url).map_err(|source| ExtractError::InvalidBase {
        url: base_url.to_string(),
        source,
    })?;

    let document = Html::parse_document(html);
    let anchors = anchor_selector();

    let links = document
        .select(&anchors)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| resolve_link(&base, href))
        .collect();

    Ok(links)
}

fn anchor_selector() -> Selector {
    // A constant, known-good selector
    Selector::parse("a[href]").expect("a[href] is a valid selector")
}

// Resolves `href` against `base`, or None if it should not be crawled.
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if PLACEHOLDER_HREFS.contains(&href) {
        return None;
    }

    // join() handles both relative and absolute hrefs
    let url = base.join(href).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url.to_string()),
        _ => None,
    }
}
