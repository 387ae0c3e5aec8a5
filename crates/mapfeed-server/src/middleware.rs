//! Middleware stack applied to every request.
//!
//! - `x-request-id` is taken from the request or generated (UUID v4) and
//!   echoed on the response
//! - each request runs in an `http_request` span carrying that id
//! - permissive CORS, the feed is called from browsers on other origins

use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span, info_span};

/// Header name for request ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Wraps `router` in the request id, tracing and CORS layers.
pub fn apply(router: Router) -> Router {
    let stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            REQUEST_ID_HEADER.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span::<Body>)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER.clone()))
        .layer(CorsLayer::permissive());

    router.layer(stack)
}

fn request_span<B>(request: &Request<B>) -> Span {
    // Set by SetRequestIdLayer before this runs.
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
