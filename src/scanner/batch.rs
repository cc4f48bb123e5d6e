// src/scanner/batch.rs
// =============================================================================
// This module runs the prober over the whole link set without opening an
// unbounded number of connections at once.
//
// The policy is chunk-then-wait:
// 1. Split the link list into consecutive chunks of at most `concurrency`
// 2. Probe everything in a chunk concurrently
// 3. Wait for the entire chunk to finish before starting the next one
//
// Peak concurrent outbound connections therefore never exceed the
// configured cap. The trade-off: one slow link in a chunk delays the start
// of the next chunk. For a single bio page with a few dozen links, that is
// a fine deal for the predictability.
//
// Ordering: join_all returns results in the same order as the futures it
// was given, regardless of which finished first. Chunks are consumed in
// input order too, so the output lines up one-to-one with the input.
//
// Rust concepts:
// - Generics with Fn + Future bounds: run_chunked doesn't care what the
//   work is, which also makes the scheduling testable without a network
// - join_all: Like Promise.all, awaits a batch and keeps input order
// =============================================================================

use futures::future::join_all;
use std::future::Future;

use super::probe::{self, LinkResult};
use crate::config::ScanConfig;

// Runs an async job over every item, at most `concurrency` at a time
//
// Parameters:
//   items: the inputs, consumed in order
//   concurrency: chunk size (values below 1 are treated as 1)
//   run: builds the future for one item
//
// Returns: one result per item, in input order
pub async fn run_chunked<T, R, F, Fut>(items: Vec<T>, concurrency: usize, run: F) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let chunk_size = concurrency.max(1);
    let mut results = Vec::with_capacity(items.len());

    let mut remaining = items.into_iter().peekable();
    while remaining.peek().is_some() {
        // Take the next chunk of items off the front
        let chunk: Vec<T> = remaining.by_ref().take(chunk_size).collect();

        // Start every probe in the chunk, then wait for all of them.
        // join_all yields results positionally, so completion order
        // doesn't matter.
        let futures: Vec<Fut> = chunk.into_iter().map(&run).collect();
        results.extend(join_all(futures).await);
    }

    results
}

// Probes every URL in the list with bounded concurrency
//
// Every input URL yields exactly one LinkResult (probe never fails), and
// the output order matches the input order.
pub async fn probe_all(urls: Vec<String>, config: &ScanConfig) -> Vec<LinkResult> {
    // One client for the whole batch: connection pooling across probes
    let client = probe::build_probe_client();
    let timeout = config.probe_timeout;

    run_chunked(urls, config.concurrency, move |url| {
        // Clone the client for each task (cheap, it's reference-counted)
        let client = client.clone();
        async move { probe::probe(&client, &url, timeout).await }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_order_preserved_under_staggered_latencies() {
        let items: Vec<usize> = (0..12).collect();

        // Within each chunk of 4, later items finish first
        let results = run_chunked(items.clone(), 4, |i| async move {
            let delay_ms = 40 - (i % 4) as u64 * 10;
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            i
        })
        .await;

        assert_eq!(results, items);
    }

    #[tokio::test]
    async fn test_output_length_equals_input_length() {
        let items: Vec<usize> = (0..23).collect();
        let results = run_chunked(items, 5, |i| async move { i * 2 }).await;
        assert_eq!(results.len(), 23);
    }

    #[tokio::test]
    async fn test_peak_concurrency_stays_at_cap() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<usize> = (0..20).collect();
        let results = run_chunked(items, 3, |i| {
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                i
            }
        })
        .await;

        assert_eq!(results.len(), 20);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_zero_concurrency_treated_as_one() {
        let results = run_chunked(vec![1, 2, 3], 0, |i| async move { i }).await;
        assert_eq!(results, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_probe_all_keeps_input_order_and_absorbs_failures() {
        let mut server = mockito::Server::new_async().await;
        let _ok = server
            .mock("HEAD", "/ok")
            .with_status(200)
            .create_async()
            .await;
        let _missing = server
            .mock("HEAD", "/missing")
            .with_status(404)
            .create_async()
            .await;

        // A port nothing listens on, for a guaranteed transport failure
        let dead_port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let urls = vec![
            format!("{}/ok", server.url()),
            format!("http://127.0.0.1:{}/", dead_port),
            format!("{}/missing", server.url()),
        ];

        let config = ScanConfig {
            concurrency: 2,
            ..ScanConfig::default()
        };
        let results = probe_all(urls.clone(), &config).await;

        // One result per input, same order, failures included as data
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].original_url, urls[0]);
        assert_eq!(results[1].original_url, urls[1]);
        assert_eq!(results[2].original_url, urls[2]);
        assert!(results[0].is_working);
        assert_eq!(results[1].status, 0);
        assert_eq!(results[2].status, 404);
    }
}
