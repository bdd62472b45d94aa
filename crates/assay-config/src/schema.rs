//! Configuration schema types.
//!
//! This module defines the structure of all configuration sections.

use assay_core::EngineLimits;
use serde::{Deserialize, Serialize};

/// Engine configuration section.
///
/// Resource budgets applied to every extraction. The defaults match
/// [`EngineLimits::default`].
///
/// # Example
///
/// ```
/// use assay_config::EngineConfig;
///
/// let config = EngineConfig {
///     max_expression_length: 512,
///     ..Default::default()
/// };
/// assert_eq!(config.limits().max_expression_length, 512);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Compiled regex size limit in bytes.
    #[serde(default = "default_regex_size_limit")]
    pub regex_size_limit: usize,

    /// Maximum regex nesting depth.
    #[serde(default = "default_regex_nest_limit")]
    pub regex_nest_limit: u32,

    /// Maximum expression length in characters.
    #[serde(default = "default_max_expression_length")]
    pub max_expression_length: usize,

    /// Maximum markup document size in bytes for XPath.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

impl EngineConfig {
    /// Returns the limits the extractor enforces.
    #[must_use]
    pub fn limits(&self) -> EngineLimits {
        EngineLimits {
            regex_size_limit: self.regex_size_limit,
            regex_nest_limit: self.regex_nest_limit,
            max_expression_length: self.max_expression_length,
            max_document_bytes: self.max_document_bytes,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regex_size_limit: default_regex_size_limit(),
            regex_nest_limit: default_regex_nest_limit(),
            max_expression_length: default_max_expression_length(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

fn default_regex_size_limit() -> usize {
    EngineLimits::DEFAULT_REGEX_SIZE_LIMIT
}

fn default_regex_nest_limit() -> u32 {
    EngineLimits::DEFAULT_REGEX_NEST_LIMIT
}

fn default_max_expression_length() -> usize {
    EngineLimits::DEFAULT_MAX_EXPRESSION_LENGTH
}

fn default_max_document_bytes() -> usize {
    EngineLimits::DEFAULT_MAX_DOCUMENT_BYTES
}

/// Metrics configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Enable metrics collection.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Histogram bucket boundaries (seconds) for extraction duration.
    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_buckets: default_duration_buckets(),
        }
    }
}

fn default_duration_buckets() -> Vec<f64> {
    assay_telemetry::MetricsConfig::default().duration_buckets
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (e.g., "info", "assay_extract=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Telemetry configuration section.
///
/// Controls logging and metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfigSection {
    /// Service name for log fields.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TelemetryConfigSection {
    /// Converts the section into the runtime telemetry configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use assay_config::{LogFormat, TelemetryConfigSection};
    ///
    /// let mut section = TelemetryConfigSection::default();
    /// section.logging.format = LogFormat::Pretty;
    ///
    /// let runtime = section.to_telemetry_config();
    /// assert!(!runtime.logging.json_format);
    /// assert_eq!(runtime.logging.service_name, "assay");
    /// ```
    #[must_use]
    pub fn to_telemetry_config(&self) -> assay_telemetry::TelemetryConfig {
        let logging = assay_telemetry::LogConfig {
            enabled: self.logging.enabled,
            level: self.logging.level.clone(),
            json_format: self.logging.format == LogFormat::Json,
            file_line_info: self.logging.include_location,
            ansi: self.logging.ansi_enabled,
            ..assay_telemetry::LogConfig::default()
        };

        assay_telemetry::TelemetryConfig::builder()
            .service_name(&self.service_name)
            .logging(logging)
            .metrics(assay_telemetry::MetricsConfig {
                enabled: self.metrics.enabled,
                duration_buckets: self.metrics.duration_buckets.clone(),
            })
            .build()
    }
}

impl Default for TelemetryConfigSection {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            metrics: MetricsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_service_name() -> String {
    "assay".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default_matches_limits() {
        assert_eq!(EngineConfig::default().limits(), EngineLimits::default());
    }

    #[test]
    fn test_engine_config_partial() {
        let config: EngineConfig = toml::from_str("regex_nest_limit = 32").unwrap();
        assert_eq!(config.regex_nest_limit, 32);
        assert_eq!(
            config.max_document_bytes,
            EngineLimits::DEFAULT_MAX_DOCUMENT_BYTES
        );
    }

    #[test]
    fn test_engine_config_unknown_field() {
        let result: Result<EngineConfig, _> = toml::from_str("timeout_ms = 5");
        assert!(result.is_err());
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_serde() {
        let format: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(format, LogFormat::Json);

        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
    }

    #[test]
    fn test_telemetry_section_conversion() {
        let section = TelemetryConfigSection {
            service_name: "suite".to_string(),
            metrics: MetricsConfig {
                enabled: false,
                duration_buckets: vec![0.1, 1.0],
            },
            logging: LoggingConfig {
                include_location: true,
                ansi_enabled: true,
                ..Default::default()
            },
        };

        let runtime = section.to_telemetry_config();
        assert_eq!(runtime.service_name, "suite");
        assert_eq!(runtime.logging.service_name, "suite");
        assert!(runtime.logging.file_line_info);
        assert!(runtime.logging.ansi);
        assert!(runtime.logging.json_format);
        assert!(!runtime.metrics.enabled);
        assert_eq!(runtime.metrics.duration_buckets, vec![0.1, 1.0]);
    }
}
