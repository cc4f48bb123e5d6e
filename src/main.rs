// src/main.rs
// =============================================================================
// This is the entry point of our application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up tracing so RUST_LOG controls diagnostics
// 3. Dispatch to the scan or serve subcommand
// 4. For one-shot scans, print the report and exit with a proper code
//    (0 = all links fine, 1 = broken links found, 2 = scan failed)
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - scan tuning knobs
mod scanner;  // src/scanner/ - the extraction and probing pipeline
mod server;   // src/server.rs - the JSON endpoint

// Import items we need from our modules
use cli::{Cli, Commands};
use clap::Parser; // Parser trait enables the parse() method
use scanner::ScanResult;
use tracing_subscriber::EnvFilter;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it.
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Ok(2) = internal error
//   Err = unexpected error
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // RUST_LOG picks the verbosity; "info" shows scan progress and the
    // server's bind address
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // The tuning flags are shared between both subcommands
    let config = cli.command.scan_config();

    // Match on which subcommand was used
    match cli.command {
        Commands::Scan { page_url, json, .. } => {
            handle_scan(&page_url, json, config).await
        }
        Commands::Serve { host, port, .. } => {
            server::serve(&host, port, config).await?;
            Ok(0)
        }
    }
}

// Handles the 'scan' subcommand
// Parameters:
//   page_url: the bio page to scan
//   json: whether to output JSON format
//   config: concurrency and timeouts for this scan
async fn handle_scan(page_url: &str, json: bool, config: config::ScanConfig) -> Result<i32> {
    if !json {
        println!("🔍 Scanning bio page: {}", page_url);
    }

    // Run the whole pipeline; a ScanError here means the page itself
    // couldn't be scanned and bubbles up as exit code 2
    let result = scanner::scan(page_url, &config).await?;

    if json {
        // Serialize the full report to JSON and print
        let json_output = serde_json::to_string_pretty(&result)?;
        println!("{}", json_output);
    } else {
        print_table(&result);
    }

    if result.broken_links > 0 {
        Ok(1) // Exit code 1 = broken links found
    } else {
        Ok(0) // Exit code 0 = all good
    }
}

// Prints the report as a human-readable table in the terminal
fn print_table(result: &ScanResult) {
    if result.links.is_empty() {
        println!("✅ No links found on the page");
        return;
    }

    // Print table header
    println!();
    println!("{:<60} {:<22} {:<14} {:>8}", "URL", "STATUS", "CLASS", "TIME");
    println!("{}", "=".repeat(108));

    // Print each result
    for link in &result.links {
        let class = if !link.is_working {
            "❌ BROKEN"
        } else if link.is_redirect {
            "🔀 REDIRECT"
        } else {
            "✅ OK"
        };

        // Transport failures have no status code, show the description
        let status_display = if link.status == 0 {
            link.status_text.clone()
        } else {
            format!("{} {}", link.status, link.status_text)
        };

        // Truncate URL if too long for display
        let url_display = if link.original_url.len() > 57 {
            format!("{}...", &link.original_url[..57])
        } else {
            link.original_url.clone()
        };

        println!(
            "{:<60} {:<22} {:<14} {:>5} ms",
            url_display, status_display, class, link.response_time_ms
        );
    }

    println!();

    // Print summary
    println!("📊 Summary:");
    println!("   ✅ Working: {}", result.working_links);
    println!("   🔀 Redirects: {}", result.redirects);
    println!("   ❌ Broken: {}", result.broken_links);
    println!("   📋 Total: {}", result.total_links);
}
