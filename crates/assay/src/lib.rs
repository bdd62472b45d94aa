//! # Assay
//!
//! **Expression-based value extraction for API test assertions**
//!
//! Assay pulls a single string out of a captured HTTP exchange so that an
//! assertion can compare it against an expectation:
//!
//! - **Locations** – query/form/path parameters, headers and bodies
//!   of both the request and the response
//! - **Methods** – exact value, `/regex/flags`, JSONPath and XPath
//! - **Total** – every call yields `{data, message, errorMessage}`, falling
//!   back to the configured default value instead of failing
//!
//! ## Quick Start
//!
//! ```rust
//! use assay::prelude::*;
//!
//! let config = ExtractionConfig::builder()
//!     .location(ExtractLocation::ResponseBody)
//!     .method(ExtractMethod::JsonPath)
//!     .expression("$.order.status")
//!     .build();
//!
//! let result = assay::execute(&config, &assay::core::fixtures::order_exchange());
//! assert_eq!(result.data, "SHIPPED");
//! ```
//!
//! ## Configured Runtime
//!
//! Hosts that load engine limits and telemetry settings from a file use
//! [`init`], which installs logging and metrics once and returns an
//! [`Extractor`] honouring the configured limits:
//!
//! ```rust,no_run
//! use assay::config::ConfigLoader;
//!
//! # fn main() -> Result<(), assay::Error> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("assay.toml")?
//!     .with_env_prefix("ASSAY")
//!     .load()?;
//!
//! let extractor = assay::init(&config)?;
//! # let _ = extractor;
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/assay/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error;

// Re-export the data model
pub use assay_core as core;

// Re-export the engine
pub use assay_extract as extract;

// Re-export configuration
pub use assay_config as config;

// Re-export telemetry
pub use assay_telemetry as telemetry;

pub use assay_extract::{execute, Extractor};

/// Errors raised while bringing up a configured runtime.
///
/// Extraction itself never fails; these only cover setup.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] assay_config::ConfigError),

    /// Logging or metrics could not be installed.
    #[error(transparent)]
    Telemetry(#[from] assay_telemetry::TelemetryError),
}

/// Builds an [`Extractor`] enforcing the limits from `config`.
///
/// No global state is touched, so this is safe to call repeatedly.
pub fn extractor(config: &assay_config::AssayConfig) -> Extractor {
    Extractor::builder().limits(config.engine.limits()).build()
}

/// Validates `config`, installs telemetry and returns a configured extractor.
///
/// Call once per process; the logging subscriber and metrics recorder are
/// global.
///
/// # Errors
///
/// Returns [`Error::Config`] if validation fails and [`Error::Telemetry`]
/// if a subscriber or recorder is already installed.
pub fn init(config: &assay_config::AssayConfig) -> Result<Extractor, Error> {
    config.validate()?;
    assay_telemetry::init_telemetry(&config.telemetry.to_telemetry_config())?;
    Ok(extractor(config))
}

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use assay::prelude::*;
///
/// let config = ExtractionConfig::builder()
///     .location(ExtractLocation::ResponseBody)
///     .method(ExtractMethod::ExactValue)
///     .default_value("none")
///     .build();
///
/// let result = Extractor::new().execute(&config, &ExchangeContext::default());
/// assert_eq!(result.data, "none");
/// ```
pub mod prelude {
    pub use assay_core::{
        EngineLimits, ExchangeContext, ExtractError, ExtractLocation, ExtractMethod, Extraction,
        ExtractionConfig, ExtractionResult, MessageFormatter,
    };

    pub use assay_extract::{Extractor, ExtractorBuilder};

    pub use assay_config::{AssayConfig, ConfigLoader};
}
