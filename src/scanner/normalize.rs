// src/scanner/normalize.rs
// =============================================================================
// This module turns the raw href strings found on a bio page into absolute
// URLs we can actually probe.
//
// Bio pages link out in every format imaginable:
// - Absolute:          https://example.com/page
// - Protocol-relative: //example.com/page
// - Root-relative:     /page
// - Relative:          page or ../page
// - Bare:              anything else someone typed into a link field
//
// We use the `url` crate to:
// - Parse and validate URLs
// - Resolve relative URLs against the page's own URL (like a browser does)
//
// Rust concepts:
// - Pattern matching on Result: To handle parse failures without panicking
// - String vs &str: Borrow the inputs, return an owned result
// =============================================================================

use url::Url;

// Normalizes a raw href against the URL of the page it was found on
//
// Parameters:
//   href: the href attribute value as it appeared in the HTML
//   base_url: the URL of the bio page (for resolving relative links)
//
// Returns: an absolute URL string, or the original string unchanged when
// it cannot be resolved (the caller rejects it with is_valid_url later)
//
// Examples:
//   normalize("/path", "https://a.com/x")     -> "https://a.com/path"
//   normalize("//a.com/p", "https://b.com")   -> "https://a.com/p"
//   normalize("rel", "https://a.com/x/y")     -> "https://a.com/x/rel"
//   normalize("https://a.com", anything)      -> "https://a.com" (unchanged)
pub fn normalize(href: &str, base_url: &str) -> String {
    // Already absolute: leave it exactly as written
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    // Protocol-relative (//host/path): the page's scheme would normally
    // apply, but bio links are effectively always https today
    if href.starts_with("//") {
        return format!("https:{}", href);
    }

    // Everything else needs the page URL to resolve against
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(_) => {
            // No usable base, return the href untouched and let the
            // validity check reject it
            return href.to_string();
        }
    };

    // join() implements standard relative resolution: "/path" resolves
    // against the origin (scheme + host + port), "rel" against the base
    // URL's own path
    match base.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => {
            // Not resolvable as a relative reference: last resort is to
            // assume it was meant as a bare https URL
            format!("https://{}", href)
        }
    }
}

// Checks whether a string is a syntactically valid URL
//
// Invalid strings are discarded by the extractor; they never reach the
// prober and never abort a scan.
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why return the original string on failure instead of an error?
//    - The extractor runs a validity check on every normalized string anyway
//    - Returning the broken input unchanged means it fails that check and
//      gets dropped, so one weird href never stops the scan
//
// 2. What does Url::join do?
//    - The same resolution a browser performs on a relative link
//    - "https://a.com/x/y".join("rel") = "https://a.com/x/rel"
//    - "https://a.com/x/y".join("/p") = "https://a.com/p"
//
// 3. Why not resolve "//host/path" with join too?
//    - join would pick the base page's scheme
//    - We pin https because that is what link aggregators serve
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_url_unchanged() {
        assert_eq!(
            normalize("https://other.com/page", "https://a.com/x"),
            "https://other.com/page"
        );
        assert_eq!(
            normalize("http://other.com", "https://a.com/x"),
            "http://other.com"
        );
    }

    #[test]
    fn test_protocol_relative() {
        assert_eq!(normalize("//a.com/p", "https://b.com/x"), "https://a.com/p");
    }

    #[test]
    fn test_root_relative_resolves_against_origin() {
        assert_eq!(normalize("/path", "https://a.com/x"), "https://a.com/path");
        assert_eq!(
            normalize("/path", "https://a.com:8080/deep/nested/page"),
            "https://a.com:8080/path"
        );
    }

    #[test]
    fn test_relative_resolves_against_base_path() {
        assert_eq!(normalize("rel", "https://a.com/x/y"), "https://a.com/x/rel");
        assert_eq!(
            normalize("../up", "https://a.com/x/y/z"),
            "https://a.com/x/up"
        );
    }

    #[test]
    fn test_unresolvable_base_returns_original() {
        assert_eq!(normalize("page", "not a base url"), "page");
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com/path?q=1"));
        assert!(is_valid_url("mailto:someone@example.com"));
        assert!(!is_valid_url("not a url at all"));
        assert!(!is_valid_url("/just/a/path"));
    }
}
