// src/scanner/probe.rs
// =============================================================================
// This module checks whether a single link is alive.
//
// Key functionality:
// - Makes an HTTP HEAD request (lightweight, no body download)
// - Follows redirects automatically and records where we ended up
// - Measures wall-clock response time
// - Never fails: every outcome, including timeouts and DNS errors, is
//   folded into the returned LinkResult
//
// That last point is the whole contract. A bio page can link to anything,
// and one dead link must never take down the scan of the other forty.
//
// Rust concepts:
// - async/await: For network I/O
// - Instant: For measuring elapsed time
// - match on Result: To turn failures into data instead of propagating them
// =============================================================================

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

// How we identify ourselves to the servers we probe
pub const USER_AGENT: &str = "biolink-scan/0.1 (bio page link health checker)";

// The outcome of probing one link
//
// #[derive(Serialize, Deserialize)] lets us convert to/from JSON
// camelCase renaming matches the JSON shape the endpoint serves
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResult {
    /// The URL exactly as it was extracted from the page
    pub original_url: String,
    /// The URL the response was ultimately served from (after redirects)
    pub final_url: String,
    /// HTTP status code, or 0 when the request never got a response
    pub status: u16,
    /// Reason phrase for the status, or a description of the failure
    pub status_text: String,
    /// True iff 200 <= status < 400
    pub is_working: bool,
    /// True iff final_url differs from original_url (see note on probe)
    pub is_redirect: bool,
    /// Wall-clock time from request start to completion or failure
    pub response_time_ms: u64,
}

// Builds the HTTP client shared by all probes in one scan
//
// Why no client-level timeout?
// - The probe timeout is configurable per scan, so we attach it to each
//   request instead of baking it into the client
pub fn build_probe_client() -> Client {
    Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10)) // follow up to 10 hops
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client")
}

// Probes a single link
//
// Parameters:
//   client: shared reqwest client (cheap to pass around, it's ref-counted)
//   url: the absolute URL to check
//   timeout: how long to wait before aborting the request
//
// Returns: LinkResult, always. Transport failures come back as
// status = 0 with a human-readable status_text.
//
// Redirect detection compares final_url to the original string
// byte-for-byte. That means purely lexical differences (a server that
// "redirects" https://a.com to https://a.com/ only in the URL printout)
// also count as redirects. Known false-positive source, kept as-is.
pub async fn probe(client: &Client, url: &str, timeout: Duration) -> LinkResult {
    let started = Instant::now();

    // The timeout covers the whole request; when it fires, the in-flight
    // request is aborted and we get an error with is_timeout() set
    let result = client.head(url).timeout(timeout).send().await;

    let response_time_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(response) => {
            // Got a response (any status code, after following redirects)
            let status = response.status();
            let final_url = response.url().to_string();
            let is_redirect = final_url != url;

            LinkResult {
                original_url: url.to_string(),
                final_url,
                status: status.as_u16(),
                status_text: status_text(status),
                is_working: status.as_u16() >= 200 && status.as_u16() < 400,
                is_redirect,
                response_time_ms,
            }
        }
        Err(error) => {
            // Request never completed - capture why, but keep going
            LinkResult {
                original_url: url.to_string(),
                final_url: url.to_string(),
                status: 0,
                status_text: describe_failure(&error),
                is_working: false,
                is_redirect: false,
                response_time_ms,
            }
        }
    }
}

// Looks up the reason phrase for a status code
//
// canonical_reason() is the standard code -> text table ("OK",
// "Not Found", ...). Codes outside the registry get a generic phrase
// instead of an empty string.
pub fn status_text(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => format!("Status {}", status.as_u16()),
    }
}

// Describes different transport failures from reqwest
//
// The timeout case must stay distinguishable from the other network
// errors, because the report treats "slow" differently from "gone".
fn describe_failure(error: &reqwest::Error) -> String {
    // Convert error to string once to avoid lifetime issues
    let error_string = error.to_string();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why HEAD instead of GET?
//    - HEAD asks the server for just the response headers, no body
//    - We only need the status code and final URL, so downloading a whole
//      page per link would be wasted bandwidth
//
// 2. Why does probe never return Result?
//    - A failed probe is still an answer: "this link is broken"
//    - Encoding failures as data (status = 0 plus a message) means the
//      caller can treat every link uniformly
//
// 3. What is Instant?
//    - A monotonic clock reading, immune to wall-clock adjustments
//    - elapsed() gives the Duration since it was taken
// -----------------------------------------------------------------------------
