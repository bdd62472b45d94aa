//! Structured logging for Assay.
//!
//! This module installs a `tracing-subscriber` registry so the spans and
//! events emitted by the extraction engine reach stdout, either as JSON
//! lines or in a human-readable layout.
//!
//! # Example
//!
//! ```rust,ignore
//! use assay_telemetry::logging::{LogConfig, init_logging};
//!
//! let config = LogConfig::development();
//! init_logging(&config)?;
//!
//! tracing::debug!(location = "RESPONSE_BODY", method = "JSON_PATH", "extracting");
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Filter directive (e.g., "info", "assay_extract=debug").
    pub level: String,

    /// Whether to output JSON format.
    pub json_format: bool,

    /// Whether to include span events (new, close).
    pub span_events: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include thread IDs.
    pub thread_ids: bool,

    /// Whether to include target (module path).
    pub include_target: bool,

    /// Whether to emit ANSI colors.
    pub ansi: bool,

    /// Service name for log fields.
    pub service_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            file_line_info: false,
            thread_ids: false,
            include_target: true,
            ansi: false,
            service_name: "assay".to_string(),
        }
    }
}

impl LogConfig {
    /// Creates a development configuration with human-readable output.
    ///
    /// Extraction misses are logged at `debug`, so they show up here.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
            ansi: true,
            ..Self::default()
        }
    }

    /// Creates a production configuration with JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "warn".to_string(),
            ..Self::default()
        }
    }
}

/// Initializes the logging subsystem.
///
/// Installs a global subscriber; a second call fails because one is already
/// set.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the filter is invalid or a
/// global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_thread_ids(config.thread_ids)
            .with_target(config.include_target)
            .with_ansi(config.ansi)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_thread_ids(config.thread_ids)
            .with_target(config.include_target)
            .with_ansi(config.ansi)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    Ok(())
}

/// Creates an env filter from a directive string.
///
/// # Arguments
///
/// * `filter` - Filter string (e.g., "info", "assay_extract=debug,warn")
///
/// # Errors
///
/// Returns error if the filter string is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter)
        .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log level: {e}")))
}

/// Standard log fields for Assay.
///
/// Use these field names for consistency across logs.
pub mod fields {
    /// Configured extraction location (wire name).
    pub const LOCATION: &str = "location";

    /// Configured extraction method (wire name).
    pub const METHOD: &str = "method";

    /// Outcome label (`extracted`, `miss`, `failed`).
    pub const OUTCOME: &str = "outcome";

    /// Reason a miss produced no value.
    pub const MISS_REASON: &str = "miss_reason";

    /// Stable error code (e.g., `REGEX_ERROR`).
    pub const ERROR_CODE: &str = "error_code";

    /// Error detail field name.
    pub const ERROR: &str = "error";

    /// Duration field name (in microseconds).
    pub const DURATION_US: &str = "duration_us";

    /// Service name field name.
    pub const SERVICE_NAME: &str = "service.name";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert!(config.json_format);
        assert!(!config.ansi);
        assert_eq!(config.level, "info");
        assert_eq!(config.service_name, "assay");
    }

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert!(!config.json_format);
        assert!(config.span_events);
        assert!(config.file_line_info);
        assert!(config.ansi);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_production_config() {
        let config = LogConfig::production();
        assert!(config.json_format);
        assert!(!config.span_events);
        assert!(!config.file_line_info);
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn test_field_names() {
        assert_eq!(fields::LOCATION, "location");
        assert_eq!(fields::ERROR_CODE, "error_code");
    }

    #[test]
    fn test_create_env_filter() {
        assert!(create_env_filter("info").is_ok());
        assert!(create_env_filter("assay_extract=debug,warn").is_ok());
        assert!(create_env_filter("assay_extract=loud").is_err());
    }

    #[test]
    fn test_disabled_logging() {
        let config = LogConfig {
            enabled: false,
            ..Default::default()
        };

        assert!(init_logging(&config).is_ok());
    }
}
