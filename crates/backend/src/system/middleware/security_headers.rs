use axum::{
    body::Body, extract::Request, http::HeaderValue, middleware::Next, response::Response,
};

use crate::shared::config;

/// Standard hardening headers on every response.
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    // Clickjacking protection
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    // Stops MIME sniffing
    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    // Limits referrer data
    headers.insert("referrer-policy", HeaderValue::from_static("no-referrer"));
    headers.insert(
        "cross-origin-opener-policy",
        HeaderValue::from_static("same-origin"),
    );
    headers.insert(
        "cross-origin-resource-policy",
        HeaderValue::from_static("same-origin"),
    );
    // Legacy header; modern browsers rely on CSP
    headers.insert("x-xss-protection", HeaderValue::from_static("0"));
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'; base-uri 'none'"),
    );

    // HSTS only outside development (180 days)
    if !config::is_development() {
        headers.insert(
            "strict-transport-security",
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        );
    }

    response
}
