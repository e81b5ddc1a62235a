//! HTML link extraction
//!
//! This module parses fetched documents and pulls out the raw `href` values
//! of their anchors. Resolution against the page Location happens later, in
//! the canonicalizer.

use crate::crawler::traits::LinkExtractor;
use scraper::{Html, Selector};

/// Schemes that never lead to a crawlable page
const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Link extractor for HTML documents, built on `scraper`
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, in document order
///
/// **Exclude:**
/// - Anchors without an `href` attribute, or with an empty one
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    /// Creates a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extracts href values from an HTML string
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_frontier::crawler::HtmlLinkExtractor;
    ///
    /// let html = r#"<html><body><a href="/page">Link</a><a>None</a></body></html>"#;
    /// let links = HtmlLinkExtractor::new().extract_from_html(html);
    /// assert_eq!(links, vec!["/page".to_string()]);
    /// ```
    pub fn extract_from_html(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let Ok(anchors) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .select(&anchors)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| is_followable(href))
            .map(str::to_string)
            .collect()
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, body: &[u8]) -> Vec<String> {
        self.extract_from_html(&String::from_utf8_lossy(body))
    }
}

/// Checks that an href is non-empty and not a special scheme
fn is_followable(href: &str) -> bool {
    let trimmed = href.trim();
    if trimmed.is_empty() {
        return false;
    }

    !SKIPPED_SCHEMES.iter().any(|scheme| {
        trimmed
            .get(..scheme.len())
            .map_or(false, |prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
