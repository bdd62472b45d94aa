//! Observability for the Assay extraction engine.
//!
//! - **Logging**: `tracing-subscriber` registry with JSON or pretty output
//! - **Metrics**: Prometheus-format metrics via the `metrics` crate
//!
//! The engine only emits through the `tracing` and `metrics` facades, so
//! nothing here is required for extraction to work. Hosts that want the
//! output call [`init_telemetry`] once at startup.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `assay_extractions_total` | Counter | `method`, `outcome` | Extractions by outcome |
//! | `assay_extraction_errors_total` | Counter | `code` | Failures by error code |
//! | `assay_extraction_duration_seconds` | Histogram | `method` | Extraction latency |
//!
//! # Example
//!
//! ```rust,ignore
//! use assay_telemetry::{init_telemetry, LogConfig, TelemetryConfig};
//!
//! let config = TelemetryConfig::builder()
//!     .service_name("checkout-suite")
//!     .logging(LogConfig::development())
//!     .build();
//!
//! init_telemetry(&config)?;
//! ```
//!
//! Rendering the collected metrics:
//!
//! ```text
//! # TYPE assay_extractions_total counter
//! assay_extractions_total{method="JSON_PATH",outcome="extracted"} 118
//! assay_extractions_total{method="REGEX",outcome="failed"} 2
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, TelemetryConfigBuilder};
pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};
pub use metrics::{init_metrics, render_metrics, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Initializes all telemetry subsystems.
///
/// Logging is installed first so metric setup failures can be reported.
///
/// # Errors
///
/// Returns `TelemetryError` if any subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_with_everything_disabled() {
        let config = TelemetryConfig {
            service_name: "test".to_string(),
            metrics: MetricsConfig {
                enabled: false,
                ..MetricsConfig::default()
            },
            logging: LogConfig {
                enabled: false,
                ..LogConfig::default()
            },
        };

        assert!(init_telemetry(&config).is_ok());
    }
}
