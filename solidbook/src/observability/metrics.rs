//! Prometheus metrics for builds and the preview server.
//!
//! Label values that come from request paths are bucketed so arbitrary
//! URLs cannot grow the label set without bound.

use std::sync::atomic::{AtomicBool, Ordering};

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use solidbook_core::routes::resolve;

use crate::error::ServerError;

/// Guard to prevent double-initialization of the metrics recorder.
static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Label used for any path that is not a known route.
pub const UNKNOWN_ROUTE_LABEL: &str = "__unknown__";

/// Sanitizes a request path for use as a metrics label.
///
/// Known routes map to their registered path (so `/solid/srp/` and
/// `/solid/srp` share a series); the stylesheet and health check keep their
/// own labels; everything else is bucketed as [`UNKNOWN_ROUTE_LABEL`].
#[must_use]
pub fn sanitize_route_label(path: &str) -> &'static str {
    match path {
        "/style.css" => "/style.css",
        "/healthz" => "/healthz",
        _ => resolve(path).map_or(UNKNOWN_ROUTE_LABEL, |route| route.path),
    }
}

/// Initializes the global metrics recorder.
///
/// When `port` is `Some`, a Prometheus HTTP listener is started on
/// `127.0.0.1:<port>`. When `None`, the recorder is installed without an
/// HTTP endpoint.
///
/// # Errors
///
/// Returns [`ServerError::Metrics`] if the recorder or HTTP listener cannot
/// be installed (e.g. port already in use).
pub fn init_metrics(port: Option<u16>) -> Result<(), ServerError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }
    port.map_or_else(
        || PrometheusBuilder::new().install_recorder().map(|_| ()),
        |p| {
            PrometheusBuilder::new()
                .with_http_listener(([127, 0, 0, 1], p))
                .install()
        },
    )
    .map_err(|e| ServerError::Metrics(e.to_string()))?;

    describe_metrics();
    Ok(())
}

fn describe_metrics() {
    describe_counter!(
        "solidbook_pages_rendered_total",
        "Total number of pages rendered"
    );
    describe_counter!(
        "solidbook_code_boxes_total",
        "Total number of code boxes built"
    );
    describe_counter!(
        "solidbook_http_requests_total",
        "HTTP requests by route and status"
    );
    describe_gauge!(
        "solidbook_routes_served",
        "Number of routes the preview server is serving"
    );
}

/// Records a rendered page and its code boxes.
pub fn record_page_rendered(page: &str, code_boxes: usize) {
    counter!("solidbook_pages_rendered_total", "page" => page.to_owned()).increment(1);
    counter!("solidbook_code_boxes_total", "page" => page.to_owned()).increment(code_boxes as u64);
}

/// Records an HTTP request.
pub fn record_http_request(path: &str, status: u16) {
    counter!(
        "solidbook_http_requests_total",
        "route" => sanitize_route_label(path),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Sets the number of routes being served.
#[allow(clippy::cast_precision_loss)]
pub fn set_routes_served(count: usize) {
    gauge!("solidbook_routes_served").set(count as f64);
}
