//! Prometheus metrics for Assay.
//!
//! The engine records through the `metrics` facade. Until [`init_metrics`]
//! installs the Prometheus recorder, recording is a no-op. No HTTP listener
//! is started; hosts call [`render_metrics`] and expose the text themselves.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `assay_extractions_total` | Counter | `method`, `outcome` | Extractions by outcome |
//! | `assay_extraction_errors_total` | Counter | `code` | Failed extractions by error code |
//! | `assay_extraction_duration_seconds` | Histogram | `method` | Extraction latency |
//!
//! # Example
//!
//! ```rust,ignore
//! use assay_telemetry::metrics::{init_metrics, record_extraction, MetricsConfig};
//!
//! init_metrics(&MetricsConfig::default())?;
//! record_extraction("REGEX", "extracted", Duration::from_micros(40));
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Extraction counter name.
pub const EXTRACTIONS_TOTAL: &str = "assay_extractions_total";

/// Error counter name.
pub const EXTRACTION_ERRORS_TOTAL: &str = "assay_extraction_errors_total";

/// Duration histogram name.
pub const EXTRACTION_DURATION_SECONDS: &str = "assay_extraction_duration_seconds";

/// Global metrics handle for rendering.
static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Histogram buckets (seconds) for extraction duration.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // 10us .. 100ms; extractions run in-process
            duration_buckets: vec![
                0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1,
            ],
        }
    }
}

/// Initializes the metrics subsystem.
///
/// Installing twice is an error because the global recorder is already set.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidConfig` for unusable buckets and
/// `TelemetryError::MetricsInit` if the recorder cannot be installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(EXTRACTION_DURATION_SECONDS.to_string()),
            &config.duration_buckets,
        )
        .map_err(|e| TelemetryError::InvalidConfig(e.to_string()))?;

    let handle = builder
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let _ = METRICS_HANDLE.set(handle);

    register_metric_descriptions();

    Ok(())
}

/// Renders metrics in Prometheus format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(EXTRACTIONS_TOTAL, "Total extractions by method and outcome");
    describe_counter!(
        EXTRACTION_ERRORS_TOTAL,
        "Failed extractions by stable error code"
    );
    describe_histogram!(
        EXTRACTION_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "Time spent in one extraction"
    );
}

/// Records a completed extraction.
///
/// Updates the following metrics:
/// - `assay_extractions_total` (incremented)
/// - `assay_extraction_duration_seconds` (histogram observation)
///
/// # Arguments
///
/// * `method` - Method wire name, or `"NONE"` when unconfigured
/// * `outcome` - `extracted`, `miss` or `failed`
/// * `duration` - Time spent
pub fn record_extraction(method: &'static str, outcome: &'static str, duration: Duration) {
    counter!(EXTRACTIONS_TOTAL, "method" => method, "outcome" => outcome).increment(1);
    histogram!(EXTRACTION_DURATION_SECONDS, "method" => method).record(duration.as_secs_f64());
}

/// Records a failed extraction by error code.
pub fn record_extraction_error(code: &'static str) {
    counter!(EXTRACTION_ERRORS_TOTAL, "code" => code).increment(1);
}
