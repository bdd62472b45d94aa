//! Main configuration types.
//!
//! This module provides the top-level [`AssayConfig`] struct and its builder.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, EngineConfig, LogFormat, TelemetryConfigSection};

/// Complete Assay configuration.
///
/// This is the root configuration type that contains all configuration sections.
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use assay_config::AssayConfig;
///
/// let config = AssayConfig::default();
/// assert_eq!(config.engine.max_expression_length, 4096);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct AssayConfig {
    /// Extraction engine limits.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Telemetry configuration (logging, metrics).
    #[serde(default)]
    pub telemetry: TelemetryConfigSection,
}

impl AssayConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use assay_config::{AssayConfig, EngineConfig};
    ///
    /// let config = AssayConfig::builder()
    ///     .engine(EngineConfig {
    ///         regex_nest_limit: 64,
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.engine.regex_nest_limit, 64);
    /// ```
    #[must_use]
    pub fn builder() -> AssayConfigBuilder {
        AssayConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - Any engine limit is zero
    /// - Duration buckets are empty, not finite or not strictly increasing
    /// - The log level is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("engine.regex_size_limit", self.engine.regex_size_limit),
            ("engine.regex_nest_limit", self.engine.regex_nest_limit as usize),
            ("engine.max_expression_length", self.engine.max_expression_length),
            ("engine.max_document_bytes", self.engine.max_document_bytes),
        ];
        if let Some((field, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::invalid_value(*field, "must be greater than zero"));
        }

        let buckets = &self.telemetry.metrics.duration_buckets;
        if self.telemetry.metrics.enabled {
            if buckets.is_empty() {
                return Err(ConfigError::invalid_value(
                    "telemetry.metrics.duration_buckets",
                    "must not be empty",
                ));
            }
            if !buckets.iter().all(|b| b.is_finite() && *b > 0.0)
                || !buckets.windows(2).all(|pair| pair[0] < pair[1])
            {
                return Err(ConfigError::invalid_value(
                    "telemetry.metrics.duration_buckets",
                    "must be positive and strictly increasing",
                ));
            }
        }

        if self.telemetry.logging.enabled {
            assay_telemetry::logging::create_env_filter(&self.telemetry.logging.level)
                .map_err(|e| ConfigError::invalid_value("telemetry.logging.level", e.to_string()))?;
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// - Pretty log formatting with ANSI colors
    /// - Debug log level, so extraction misses are visible
    /// - Source locations in logs
    ///
    /// # Example
    ///
    /// ```
    /// use assay_config::AssayConfig;
    ///
    /// let config = AssayConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.telemetry.logging.ansi_enabled = true;
        config.telemetry.logging.include_location = true;

        config
    }

    /// Create a production configuration preset.
    ///
    /// - JSON log formatting
    /// - Warn log level (failures only)
    /// - Tighter expression budget for untrusted suites
    ///
    /// # Example
    ///
    /// ```
    /// use assay_config::AssayConfig;
    ///
    /// let config = AssayConfig::production();
    /// assert_eq!(config.telemetry.logging.format, assay_config::LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();

        config.telemetry.logging.level = "warn".to_string();
        config.telemetry.logging.format = LogFormat::Json;
        config.telemetry.logging.ansi_enabled = false;

        config.engine.max_expression_length = 1024;
        config.engine.regex_size_limit = 1 << 20;

        config
    }
}

/// Builder for [`AssayConfig`].
#[derive(Debug, Default)]
pub struct AssayConfigBuilder {
    engine: Option<EngineConfig>,
    telemetry: Option<TelemetryConfigSection>,
}

impl AssayConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration.
    #[must_use]
    pub fn engine(mut self, engine: EngineConfig) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Set the telemetry configuration.
    #[must_use]
    pub fn telemetry(mut self, telemetry: TelemetryConfigSection) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> AssayConfig {
        AssayConfig {
            engine: self.engine.unwrap_or_default(),
            telemetry: self.telemetry.unwrap_or_default(),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<AssayConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
