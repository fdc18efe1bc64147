//! Prometheus recorder, scrape endpoint and per-request metrics
//!
//! - `http_requests_total`: counter labelled `method`, `path`, `status`
//! - `http_request_duration_seconds`: histogram labelled `method`, `path`
//! - `company_events_total`: counter labelled `topic`, recorded by the
//!   company usecase

use std::sync::OnceLock;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Error)]
#[error("cannot install Prometheus recorder: {0}")]
pub struct RecorderError(String);

static PROMETHEUS: OnceLock<Result<PrometheusHandle, RecorderError>> = OnceLock::new();

/// Install the process-wide recorder, or return the one installed earlier.
/// Concurrent callers all get the outcome of the single installation.
pub fn install_recorder() -> Result<PrometheusHandle, RecorderError> {
    PROMETHEUS
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            metrics::set_global_recorder(recorder)
                .map_err(|e| RecorderError(e.to_string()))?;
            info!("Prometheus metrics recorder installed");
            Ok(handle)
        })
        .clone()
}

/// Shared state for the metrics endpoint
#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics`: Prometheus scrape endpoint (no auth)
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    // No upkeep thread runs with a bare recorder; drain histograms here.
    state.handle.run_upkeep();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    // Route template keeps label cardinality bounded.
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    metrics::counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(duration);

    response
}
