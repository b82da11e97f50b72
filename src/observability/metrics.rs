//! Metrics collection and exposition.
//!
//! # Metrics
//! - `users_api_requests_total` (counter): requests by method, path, status
//! - `users_api_request_duration_seconds` (histogram): latency by method, path
//!
//! # Design Decisions
//! - The `path` label holds the matched route template (`/users/{user_id}`), never the
//!   raw path, to keep cardinality bounded
//! - Without an installed recorder every update is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "users_api_requests_total";
pub const REQUEST_DURATION: &str = "users_api_request_duration_seconds";

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!(
        REQUEST_DURATION,
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Route-level middleware feeding [`record_request`].
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;
    record_request(&method, &path, response.status().as_u16(), start);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Router};
    use metrics_exporter_prometheus::PrometheusRecorder;
    use tower::ServiceExt;

    fn recorder() -> PrometheusRecorder {
        PrometheusBuilder::new().build_recorder()
    }

    #[test]
    fn record_request_emits_both_metrics_with_path_label() {
        let recorder = recorder();
        let handle = recorder.handle();

        ::metrics::with_local_recorder(&recorder, || {
            record_request("GET", "/users/{user_id}", 200, Instant::now());
        });

        let rendered = handle.render();
        assert!(rendered.contains(
            r#"users_api_requests_total{method="GET",path="/users/{user_id}",status="200"} 1"#
        ));
        assert!(rendered.contains(REQUEST_DURATION));
        assert!(rendered.contains(
            r#"users_api_request_duration_seconds_count{method="GET",path="/users/{user_id}"} 1"#
        ));
        assert!(!rendered.contains("route="));
    }

    #[test]
    fn middleware_labels_with_matched_template() {
        let recorder = recorder();
        let handle = recorder.handle();

        let app: Router = Router::new()
            .route("/users/{user_id}", get(|| async { "ok" }))
            .route_layer(middleware::from_fn(track_requests));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        ::metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let request = Request::builder()
                    .uri("/users/42")
                    .body(Body::empty())
                    .unwrap();
                let response = app.oneshot(request).await.unwrap();
                assert_eq!(response.status(), 200);
            });
        });

        let rendered = handle.render();
        assert!(rendered.contains(REQUESTS_TOTAL));
        assert!(rendered.contains(r#"path="/users/{user_id}""#));
        assert!(rendered.contains(r#"status="200""#));
        assert!(!rendered.contains("/users/42"));
    }
}
