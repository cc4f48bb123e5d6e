// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Two ways to run the scanner:
// - `scan`: one-shot scan of a page, results printed to the terminal
// - `serve`: long-running HTTP server exposing the same scan as JSON
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand};

use crate::config::{
    ScanConfig, DEFAULT_CONCURRENCY, DEFAULT_PAGE_FETCH_TIMEOUT_MS, DEFAULT_PROBE_TIMEOUT_MS,
};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "biolink-scan",
    version = "0.1.0",
    about = "Scan a bio page (Linktree-style) for broken and redirecting links",
    long_about = "biolink-scan fetches a single link-in-bio page, extracts every outbound \
                  link, and probes each one to report whether it works, redirects, or is broken. \
                  Run it once from the terminal, or start it as a small JSON API."
)]
pub struct Cli {
    // The #[command(subcommand)] attribute tells clap that this field
    // will hold one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

// This enum defines our subcommands (scan, serve)
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a bio page once and print the per-link report
    ///
    /// Example: biolink-scan scan https://linktr.ee/someone
    Scan {
        /// URL of the bio page to scan
        ///
        /// This is a positional argument (required, no flag needed)
        page_url: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// How many links to probe at the same time
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Timeout for fetching the bio page itself, in milliseconds
        #[arg(long, default_value_t = DEFAULT_PAGE_FETCH_TIMEOUT_MS)]
        page_timeout_ms: u64,

        /// Timeout for each individual link probe, in milliseconds
        #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
        probe_timeout_ms: u64,
    },

    /// Run the scanner as an HTTP server (POST /api/scan)
    ///
    /// Example: biolink-scan serve --port 3000
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,

        /// How many links to probe at the same time
        #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Timeout for fetching the bio page itself, in milliseconds
        #[arg(long, default_value_t = DEFAULT_PAGE_FETCH_TIMEOUT_MS)]
        page_timeout_ms: u64,

        /// Timeout for each individual link probe, in milliseconds
        #[arg(long, default_value_t = DEFAULT_PROBE_TIMEOUT_MS)]
        probe_timeout_ms: u64,
    },
}

impl Commands {
    // Collects the shared tuning flags into a ScanConfig
    pub fn scan_config(&self) -> ScanConfig {
        match self {
            Commands::Scan {
                concurrency,
                page_timeout_ms,
                probe_timeout_ms,
                ..
            }
            | Commands::Serve {
                concurrency,
                page_timeout_ms,
                probe_timeout_ms,
                ..
            } => ScanConfig::from_millis(*concurrency, *page_timeout_ms, *probe_timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defaults() {
        let cli = Cli::parse_from(["biolink-scan", "scan", "https://linktr.ee/someone"]);
        let config = cli.command.scan_config();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.page_fetch_timeout.as_millis(), 15_000);
        assert_eq!(config.probe_timeout.as_millis(), 10_000);
    }

    #[test]
    fn test_scan_flag_overrides() {
        let cli = Cli::parse_from([
            "biolink-scan",
            "scan",
            "https://linktr.ee/someone",
            "--concurrency",
            "3",
            "--probe-timeout-ms",
            "2500",
        ]);
        let config = cli.command.scan_config();
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.probe_timeout.as_millis(), 2_500);
    }

    #[test]
    fn test_serve_parses() {
        let cli = Cli::parse_from(["biolink-scan", "serve", "--port", "8080"]);
        match cli.command {
            Commands::Serve { port, ref host, .. } => {
                assert_eq!(port, 8080);
                assert_eq!(host.as_str(), "127.0.0.1");
            }
            ref other => panic!("expected serve, got {:?}", other),
        }
    }
}
