//! Request timing middleware.

use std::time::{Duration, Instant};

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// Logs how long each request took, so cache hits and misses can be compared.
pub async fn request_timing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = elapsed_millis(start.elapsed());
    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms,
        "Request to {} took {}ms",
        path,
        elapsed_ms
    );

    response
}

/// Whole milliseconds in `elapsed`, saturating at `u64::MAX`.
fn elapsed_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
