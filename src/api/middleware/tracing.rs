//! Request tracing for the API.
//!
//! Each request gets an `INFO` span carrying the method, path and the caller IP taken
//! from the proxy headers. Query strings are left out of the span because the catalog
//! key may travel as `?key=`.

use axum::{body::Body, http::Request};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{Level, Span};

use crate::utils::client_ip::client_ip_from_headers;

/// Builds the request span.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl MakeSpan<Body> for RequestSpan {
    fn make_span(&mut self, request: &Request<Body>) -> Span {
        let client_ip = client_ip_from_headers(request.headers());
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            client_ip = %client_ip,
        )
    }
}

pub type RequestTraceLayer = TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan>;

/// Creates the tracing layer.
///
/// Responses are logged at `INFO` with status and latency in milliseconds; 5xx
/// responses are additionally logged at `ERROR`.
///
/// ```text
/// INFO request{method=POST path=/api/ai-generate client_ip=203.0.113.7}: finished processing request latency=812 ms status=200
/// ```
pub fn layer() -> RequestTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
