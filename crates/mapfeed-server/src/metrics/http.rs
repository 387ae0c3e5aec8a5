//! HTTP metrics middleware.

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics::{counter, histogram};

/// Records request count and latency, labelled by route template.
pub async fn http_metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    // Unmatched paths share one label so scanners cannot blow up cardinality.
    let route = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();

    counter!(
        "mapfeed_http_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);

    histogram!(
        "mapfeed_http_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Registers the HTTP metrics.
pub fn register_http_metrics() {
    metrics::describe_counter!(
        "mapfeed_http_requests_total",
        "Total number of HTTP requests"
    );
    metrics::describe_histogram!(
        "mapfeed_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
}
