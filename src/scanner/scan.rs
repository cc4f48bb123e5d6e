// src/scanner/scan.rs
// =============================================================================
// This module is the orchestrator: it owns one whole scan from page URL to
// finished report.
//
// The flow:
// 1. Validate the page URL (bad input fails fast, before any network I/O)
// 2. Fetch the bio page's HTML (own timeout, longer than a probe's)
// 3. Extract the unique outbound links
// 4. Probe them all with bounded concurrency
// 5. Count working / redirect / broken and assemble the ScanResult
//
// Failure taxonomy:
// - Problems with the page itself (bad URL, fetch failure) are real errors,
//   returned as ScanError so the HTTP layer can map them to status codes
// - Problems with individual links are NOT errors; the prober already
//   folded them into their LinkResult
//
// Rust concepts:
// - thiserror: Derive macro for error enums with Display messages
// - The ? operator with map_err: Translating transport errors into our enum
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::batch;
use super::extract;
use super::normalize;
use super::probe::{self, LinkResult};
use crate::config::ScanConfig;

// Ways a scan can fail outright
//
// Per-link problems never show up here; they live inside the LinkResults.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The submitted page URL isn't a URL at all
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The bio page itself didn't answer within the page fetch timeout
    #[error("Timed out fetching {0}")]
    FetchTimeout(String),

    /// The bio page answered with a non-success status
    #[error("Failed to fetch page: HTTP {status} {reason}")]
    FetchStatus { status: u16, reason: String },

    /// The bio page couldn't be reached (DNS, connection, TLS, ...)
    #[error("Failed to fetch page: {0}")]
    FetchFailed(String),
}

// The finished report for one bio page
//
// Counting rule: redirects are working links whose final URL moved, so
// working_links + redirects + broken_links == total_links always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub total_links: usize,
    /// Working and served from the original URL
    pub working_links: usize,
    pub broken_links: usize,
    /// Working but served from a different final URL
    pub redirects: usize,
    /// One entry per unique link, in the order they appear on the page
    pub links: Vec<LinkResult>,
}

impl ScanResult {
    // The report for a page with no extractable links: a success, not an
    // error, just an empty one
    fn empty() -> Self {
        ScanResult {
            total_links: 0,
            working_links: 0,
            broken_links: 0,
            redirects: 0,
            links: Vec::new(),
        }
    }
}

// Scans a bio page end to end
//
// Parameters:
//   page_url: the page to scan, as submitted by the caller
//   config: concurrency and timeouts for this scan
//
// Returns: the full ScanResult, or a ScanError describing why the page
// itself couldn't be scanned
pub async fn scan(page_url: &str, config: &ScanConfig) -> Result<ScanResult, ScanError> {
    // Reject garbage input before doing any I/O
    if !normalize::is_valid_url(page_url) {
        return Err(ScanError::InvalidUrl(page_url.to_string()));
    }

    let html = fetch_page(page_url, config).await?;

    let links = extract::extract_links(&html, page_url);
    info!("Extracted {} unique links from {}", links.len(), page_url);

    if links.is_empty() {
        return Ok(ScanResult::empty());
    }

    let results = batch::probe_all(links, config).await;

    Ok(aggregate(results))
}

// Fetches the bio page's HTML
//
// Unlike the probes, this is a GET (we need the body) with its own, more
// generous timeout, and each failure mode maps to a distinct ScanError.
async fn fetch_page(url: &str, config: &ScanConfig) -> Result<String, ScanError> {
    // Default redirect policy: if the page URL redirects, follow it
    let client = reqwest::Client::builder()
        .user_agent(probe::USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");

    let response = client
        .get(url)
        .timeout(config.page_fetch_timeout)
        .send()
        .await
        .map_err(|error| {
            if error.is_timeout() {
                ScanError::FetchTimeout(url.to_string())
            } else {
                ScanError::FetchFailed(error.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScanError::FetchStatus {
            status: status.as_u16(),
            reason: probe::status_text(status),
        });
    }

    response
        .text()
        .await
        .map_err(|error| ScanError::FetchFailed(error.to_string()))
}

// Turns the per-link results into the aggregate report
//
// The three buckets partition the links: a redirect that lands on a broken
// status counts as broken, not as a redirect.
fn aggregate(links: Vec<LinkResult>) -> ScanResult {
    let working_links = links
        .iter()
        .filter(|link| link.is_working && !link.is_redirect)
        .count();
    let redirects = links
        .iter()
        .filter(|link| link.is_working && link.is_redirect)
        .count();
    let broken_links = links.iter().filter(|link| !link.is_working).count();

    ScanResult {
        total_links: links.len(),
        working_links,
        broken_links,
        redirects,
        links,
    }
}
