// src/scanner/extract.rs
// =============================================================================
// This module extracts the outbound links from a bio page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser), so broken or partial
//   HTML still yields whatever could be parsed
//
// The output is the exact link list the rest of the pipeline works on:
// absolute http(s) URLs, deduplicated, in the order they first appear in
// the document. That order is preserved all the way into the final report.
//
// Rust concepts:
// - HashSet: O(1) "have we seen this string before?"
// - Iterators and if let: For walking the selected elements
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;

use super::normalize::{is_valid_url, normalize};

// Extracts all probeable links from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: Vec<String> of unique absolute URLs in first-seen document order
//
// Example:
//   html = "<a href='/docs'>Docs</a> <a href='/docs'>Again</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();
    // Tracks which normalized URLs we already pushed, so duplicates keep
    // only their first occurrence
    let mut seen = HashSet::new();

    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Create a CSS selector to find all <a> tags carrying an href
    // Selector::parse returns Result, so we use .unwrap() which panics on error
    // This is OK here because our selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    // select() walks the document in document order, which is what keeps
    // the final report in the same order as the page itself
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            let normalized = normalize(href, base_url);

            // Drop anything that didn't survive normalization
            if !is_valid_url(&normalized) {
                continue;
            }

            // Drop email/phone links and any other non-web scheme
            if normalized.starts_with("mailto:") || normalized.starts_with("tel:") {
                continue;
            }
            if !is_checkable_link(&normalized) {
                continue;
            }

            // insert() returns false if the value was already present
            if seen.insert(normalized.clone()) {
                links.push(normalized);
            }
        }
    }

    links
}

// Checks if a URL is something we can probe
//
// We skip:
// - mailto: links (email)
// - tel: links (phone)
// - javascript: links
// - data: links (inline data)
// - file: links (local files)
fn is_checkable_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
