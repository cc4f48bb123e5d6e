// src/server.rs
// =============================================================================
// This file exposes the scanner over HTTP.
//
// There is exactly one endpoint:
//
//   POST /api/scan     body: { "url": "https://linktr.ee/someone" }
//
// Responses, always JSON:
//   200 -> the full ScanResult
//   400 -> { "error": ... }  bad body, bad URL, or the page answered
//                            with a non-success status
//   408 -> { "error": ... }  the page fetch hit its own timeout
//   500 -> { "error": ... }  the page couldn't be reached at all
//
// Note the asymmetry: these statuses describe fetching the BIO PAGE. The
// links on it can be as broken as they like; that's data in the 200 body.
//
// Rust concepts:
// - axum extractors: State for shared config, Json for the body
// - Result<Json<T>, JsonRejection>: Lets us catch malformed bodies and
//   answer with our own JSON instead of axum's default plain-text error
// =============================================================================

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::config::ScanConfig;
use crate::scanner::{self, ScanError};

// The request body for a scan
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub url: String,
}

// Builds the application router
//
// Split out from serve() so tests can construct the app without binding
// a socket.
pub fn router(config: Arc<ScanConfig>) -> Router {
    Router::new()
        .route("/api/scan", post(handle_scan))
        .with_state(config)
}

// Binds the listener and runs the server until it is shut down
pub async fn serve(host: &str, port: u16, config: ScanConfig) -> anyhow::Result<()> {
    let app = router(Arc::new(config));

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

// Handles POST /api/scan
//
// The Json extractor is wrapped in Result so a missing or malformed body
// lands here instead of short-circuiting with axum's stock 400 page.
async fn handle_scan(
    State(config): State<Arc<ScanConfig>>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", rejection),
            );
        }
    };

    info!("Scanning {}", request.url);

    match scanner::scan(&request.url, &config).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error_status(&error), error.to_string()),
    }
}

// Maps each scan failure category to its HTTP status
fn error_status(error: &ScanError) -> StatusCode {
    match error {
        ScanError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        ScanError::FetchStatus { .. } => StatusCode::BAD_REQUEST,
        ScanError::FetchTimeout(_) => StatusCode::REQUEST_TIMEOUT,
        ScanError::FetchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// A JSON { "error": ... } body with the given status
fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_status(&ScanError::InvalidUrl("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&ScanError::FetchStatus {
                status: 503,
                reason: "Service Unavailable".into()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&ScanError::FetchTimeout("https://slow.example".into())),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            error_status(&ScanError::FetchFailed("connection refused".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_fetch_status_message_carries_upstream_reason() {
        let error = ScanError::FetchStatus {
            status: 503,
            reason: "Service Unavailable".into(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch page: HTTP 503 Service Unavailable"
        );
    }

    #[test]
    fn test_scan_request_deserializes() {
        let request: ScanRequest =
            serde_json::from_str(r#"{ "url": "https://linktr.ee/someone" }"#).unwrap();
        assert_eq!(request.url, "https://linktr.ee/someone");

        // Wrong shape fails, which the handler reports as a 400
        assert!(serde_json::from_str::<ScanRequest>(r#"{ "link": "x" }"#).is_err());
    }

    #[test]
    fn test_router_builds() {
        let _app = router(Arc::new(ScanConfig::default()));
    }
}
