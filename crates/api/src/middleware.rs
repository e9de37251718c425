use std::time::Instant;

use axum::{extract::MatchedPath, middleware::Next, response::Response};

/// Log one line per request: method, route, status and latency.
///
/// The matched route template is logged instead of the raw path so emails in
/// lookups don't end up in logs.
pub async fn request_logging(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "<unmatched>".to_owned());
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        method = %method,
        route = %route,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
