//! Request logging middleware.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Header carrying the per-request id set by the router.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs one line per request with its id, route, status and latency.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis();

    if response.status().is_server_error() {
        warn!(
            target: "http",
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status,
            duration_ms = %duration_ms,
            "HTTP request failed"
        );
    } else {
        info!(
            target: "http",
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status,
            duration_ms = %duration_ms,
            "HTTP request completed"
        );
    }

    response
}
