use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Caller-supplied (or generated) id that groups log lines across services.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

/// Server-generated id unique to this request.
#[derive(Debug, Clone)]
pub struct TraceId(pub String);

/// Accept an inbound `X-Correlation-Id` or mint one, expose both ids to
/// the rest of the pipeline via request extensions, and echo the
/// correlation id on the response.
pub async fn correlation_context(mut req: Request<Body>, next: Next) -> Response {
    let correlation_id = req
        .headers()
        .get(CORRELATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());

    let trace_id = uuid::Uuid::new_v4().simple().to_string();

    req.extensions_mut()
        .insert(CorrelationId(correlation_id.clone()));
    req.extensions_mut().insert(TraceId(trace_id));

    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(CORRELATION_HEADER), value);
    }

    response
}
