use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};
use serde_json::json;

use super::correlation::{CorrelationId, TraceId};

/// Enrich `application/problem+json` error bodies with the request
/// path and the ids issued by the correlation middleware. Other
/// responses pass through untouched.
pub async fn problem_context(req: Request<Body>, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let correlation_id = req.extensions().get::<CorrelationId>().cloned();
    let trace_id = req.extensions().get::<TraceId>().cloned();

    let response = next.run(req).await;

    let is_problem = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/problem+json"))
        .unwrap_or(false);
    if !is_problem {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => return Response::from_parts(parts, Body::default()),
    };

    let enriched = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(mut value) => {
            if let Some(obj) = value.as_object_mut() {
                obj.insert("instance".to_string(), json!(path));
                if let Some(TraceId(id)) = trace_id {
                    obj.insert("traceId".to_string(), json!(id));
                }
                if let Some(CorrelationId(id)) = correlation_id {
                    obj.insert("correlationId".to_string(), json!(id));
                }
            }
            serde_json::to_vec(&value).unwrap_or_else(|_| bytes.to_vec())
        }
        Err(_) => bytes.to_vec(),
    };

    // Body length changed; let the new body carry the size
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(enriched))
}
