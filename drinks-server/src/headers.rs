use axum::{body::Body, http::Request, middleware::Next, response::Response};
use http::HeaderValue;

pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Content-Type, Authorization, true";
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "GET, POST, PATCH, DELETE, OPTIONS";

/// Appends the CORS response headers every response must carry.
pub async fn append_cors_headers(req: Request<Body>, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ACCESS_CONTROL_ALLOW_HEADERS),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ACCESS_CONTROL_ALLOW_METHODS),
    );
    response
}
