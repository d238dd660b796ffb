use axum::{body::Body, extract::Request, middleware::Next, response::Response};

use super::correlation::CorrelationId;

/// Per-request log line: method, path, status, latency, correlation id.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let correlation_id = req
        .extensions()
        .get::<CorrelationId>()
        .map(|c| c.0.clone())
        .unwrap_or_default();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if status >= 500 {
        tracing::error!(%method, path = %path, status, elapsed_ms, correlation_id = %correlation_id, "request failed");
    } else {
        tracing::info!(%method, path = %path, status, elapsed_ms, correlation_id = %correlation_id, "request");
    }

    response
}
