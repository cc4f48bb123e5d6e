// src/scanner/mod.rs
// =============================================================================
// This module contains the whole scanning pipeline.
//
// Submodules, in the order data flows through them:
// - normalize: turns raw href strings into absolute URLs
// - extract: pulls anchor hrefs out of an HTML page
// - probe: makes one HTTP request per link and classifies the outcome
// - batch: runs probes over the full link set with bounded concurrency
// - scan: fetches the page and ties the other pieces together
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that other parts of our application can use.
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// =============================================================================

// Declare submodules (tells Rust to include these files)
mod batch;
mod extract;
mod normalize;
mod probe;
mod scan;

// Re-export public items from submodules
// This lets users write `scanner::scan()` instead of
// `scanner::scan::scan()`
pub use batch::probe_all;
pub use extract::extract_links;
pub use normalize::{is_valid_url, normalize};
pub use probe::{probe, LinkResult};
pub use scan::{scan, ScanError, ScanResult};
