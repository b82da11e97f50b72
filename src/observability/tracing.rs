//! Per-request spans.

use axum::{body::Body, http::Request};
use tracing::Span;

use crate::http::request::RequestIdExt;

/// Span for one HTTP request, tagged with its request ID.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = request.request_id().unwrap_or("unknown"),
    )
}
