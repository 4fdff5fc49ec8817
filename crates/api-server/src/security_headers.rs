use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::AppState;

const HSTS_VALUE: &str = "max-age=63072000; includeSubDomains";

/// Headers every API response carries.
pub fn apply_security_headers(headers: &mut HeaderMap, enable_hsts: bool) {
    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    // API-only: nothing should ever be rendered or framed
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );
    headers.insert("referrer-policy", HeaderValue::from_static("no-referrer"));
    // Reports are derived from uploaded documents and must not be cached
    headers.insert("cache-control", HeaderValue::from_static("no-store"));

    // Only behind TLS termination
    if enable_hsts {
        headers.insert("strict-transport-security", HeaderValue::from_static(HSTS_VALUE));
    }
}

pub async fn security_headers_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    apply_security_headers(response.headers_mut(), state.config.enable_hsts);
    response
}
