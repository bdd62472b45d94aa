//! # Assay Core
//!
//! Core types for the Assay extraction engine.
//!
//! This crate provides the data model shared by every Assay crate:
//!
//! - [`ExtractionConfig`] - Declarative description of what to extract and how
//! - [`ExchangeContext`] - Read-only snapshot of one captured HTTP exchange
//! - [`Extraction`] - Typed outcome of one extraction (extracted, miss, failed)
//! - [`ExtractionResult`] - The `{ data, message, errorMessage }` boundary shape
//! - [`ExtractError`] - Configuration, context and expression error taxonomy
//! - [`MessageFormatter`] - Injectable rendering of [`Diagnostic`]s into text
//! - [`EngineLimits`] - Resource budgets applied to patterns and documents
//!
//! The engine itself lives in `assay-extract`; this crate has no behavior
//! beyond value normalization and result rendering.

#![doc(html_root_url = "https://docs.rs/assay-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod exchange;
pub mod fixtures;
mod limits;
mod message;
mod outcome;
pub mod value;

pub use config::{ExtractLocation, ExtractMethod, ExtractionConfig, ExtractionConfigBuilder};
pub use error::{ErrorCategory, ExtractError, ExtractResult, PatternError};
pub use exchange::{ExchangeContext, ExchangeContextBuilder, ParameterMap, ResponseBody};
pub use limits::EngineLimits;
pub use message::{Diagnostic, EnglishMessages, FnFormatter, MessageFormatter};
pub use outcome::{Extraction, ExtractionResult, MissReason};

/// Re-exported so callers can build candidate values without a direct dependency.
pub use serde_json::Value;
