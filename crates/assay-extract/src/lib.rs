//! # Assay Extract
//!
//! Expression-based value extraction over captured HTTP exchanges.
//!
//! An assertion names *where* a value lives ([`ExtractLocation`]) and *how*
//! to narrow it down ([`ExtractMethod`]). This crate resolves the location
//! inside an [`ExchangeContext`], runs the chosen strategy and always
//! produces an [`ExtractionResult`], falling back to the configured default
//! value when anything goes wrong.
//!
//! ## Methods
//!
//! | Method | Expression | Description |
//! |--------|------------|-------------|
//! | `EXACT_VALUE` | none | The located value, stringified |
//! | `REGEX` | `/pattern/flags` | Whole match or the `matchItem`-th group |
//! | `JSON_PATH` | RFC 9535 JSONPath | Query structured (or JSON text) data |
//! | `X_PATH` | XPath 1.0 | Query markup text |
//!
//! ## Example
//!
//! ```rust
//! use assay_core::{fixtures, ExtractLocation, ExtractMethod, ExtractionConfig};
//!
//! let config = ExtractionConfig::builder()
//!     .location(ExtractLocation::ResponseHeader)
//!     .parameter_name("x-ratelimit-remaining")
//!     .method(ExtractMethod::Regex)
//!     .expression(r"/\d+/")
//!     .build();
//!
//! let result = assay_extract::execute(&config, &fixtures::order_exchange());
//! assert_eq!(result.data, "57");
//! ```
//!
//! ## Failures
//!
//! Nothing escapes as a panic or `Err`. A failed extraction carries the
//! default value in `data`, a default-aware note in `message` and a plain
//! description in `errorMessage`:
//!
//! ```rust
//! use assay_core::{fixtures, ExtractLocation, ExtractMethod, ExtractionConfig};
//!
//! let config = ExtractionConfig::builder()
//!     .location(ExtractLocation::ResponseBody)
//!     .method(ExtractMethod::Regex)
//!     .expression("/(unclosed/")
//!     .default_value("n/a")
//!     .build();
//!
//! let result = assay_extract::execute(&config, &fixtures::order_exchange());
//! assert_eq!(result.data, "n/a");
//! assert_eq!(result.message, "regex error, default value was used");
//! assert_eq!(result.error_message, "regex error");
//! ```

#![doc(html_root_url = "https://docs.rs/assay-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
pub mod pattern;
mod resolver;
pub mod strategy;

pub use engine::{execute, Extractor, ExtractorBuilder};
pub use pattern::{is_valid_pattern, CompiledPattern, PatternFlags};
pub use resolver::resolve;

// Re-export the data model for convenience
pub use assay_core::{
    ExchangeContext, ExtractError, ExtractLocation, ExtractMethod, Extraction, ExtractionConfig,
    ExtractionResult,
};
