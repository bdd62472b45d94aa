//! Typed configuration for Assay.
//!
//! This crate provides a strongly-typed configuration system for hosts that
//! embed the extraction engine, with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides (and `.env` files)
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! The configuration system is built around the [`AssayConfig`] struct:
//!
//! - [`EngineConfig`] - Resource limits for patterns, expressions and documents
//! - [`TelemetryConfigSection`] - Logging and metrics settings
//!
//! # Example
//!
//! ```no_run
//! use assay_config::ConfigLoader;
//!
//! # fn main() -> Result<(), assay_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_optional_file("assay.toml")?
//!     .with_env_prefix("ASSAY")
//!     .load()?;
//!
//! let limits = config.engine.limits();
//! println!("expressions are capped at {} characters", limits.max_expression_length);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [engine]
//! regex_size_limit = 10485760
//! regex_nest_limit = 250
//! max_expression_length = 4096
//! max_document_bytes = 16777216
//!
//! [telemetry]
//! service_name = "checkout-suite"
//!
//! [telemetry.metrics]
//! enabled = true
//! duration_buckets = [0.00001, 0.0001, 0.001, 0.01, 0.1]
//!
//! [telemetry.logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`. For example:
//!
//! - `ASSAY__ENGINE__MAX_EXPRESSION_LENGTH=1024`
//! - `ASSAY__TELEMETRY__LOGGING__LEVEL=assay_extract=debug`
//! - `ASSAY__TELEMETRY__METRICS__ENABLED=false`

#![warn(missing_docs)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
