// src/config.rs
// =============================================================================
// This file holds the knobs that control a scan.
//
// There are only three of them:
// - concurrency: how many links we probe at the same time
// - page_fetch_timeout: how long we wait for the bio page itself
// - probe_timeout: how long we wait for each individual link
//
// Both the CLI and the HTTP server build one ScanConfig and hand it to the
// scanner, so the defaults live here in one place.
//
// Rust concepts:
// - Duration: std's type for spans of time
// - Default trait: gives us ScanConfig::default()
// =============================================================================

use std::time::Duration;

// Default values, also referenced by the CLI flag definitions
pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_PAGE_FETCH_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;

// Configuration for one scan (or for every scan a server instance runs)
//
// Clone is cheap here (three plain values), so the server can hand a copy
// to each request without any locking.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// How many links to probe concurrently in one batch
    pub concurrency: usize,
    /// Timeout for fetching the bio page itself
    pub page_fetch_timeout: Duration,
    /// Timeout for each individual link probe
    pub probe_timeout: Duration,
}

impl ScanConfig {
    // Builds a config from millisecond values (the unit the CLI flags use)
    pub fn from_millis(concurrency: usize, page_fetch_timeout_ms: u64, probe_timeout_ms: u64) -> Self {
        ScanConfig {
            concurrency,
            page_fetch_timeout: Duration::from_millis(page_fetch_timeout_ms),
            probe_timeout: Duration::from_millis(probe_timeout_ms),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig::from_millis(
            DEFAULT_CONCURRENCY,
            DEFAULT_PAGE_FETCH_TIMEOUT_MS,
            DEFAULT_PROBE_TIMEOUT_MS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.page_fetch_timeout, Duration::from_secs(15));
        assert_eq!(config.probe_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_from_millis() {
        let config = ScanConfig::from_millis(4, 1_500, 250);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.page_fetch_timeout, Duration::from_millis(1_500));
        assert_eq!(config.probe_timeout, Duration::from_millis(250));
    }
}
