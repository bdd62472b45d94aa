//! Extraction error types.
//!
//! [`ExtractError`] covers every way an extraction can logically fail. None
//! of them escape the engine: the orchestrator folds each one into an
//! [`Extraction::Failed`](crate::Extraction::Failed) carrying the default
//! value, and the boundary adapter renders it into `message`/`errorMessage`.
//!
//! | Category | Variants |
//! |---|---|
//! | `Configuration` | `MissingLocation`, `MissingMethod`, `MissingParameterName`, `MissingExpression` |
//! | `Context` | `ContainerEmpty`, `ParameterNotFound`, `ResponseBodyEmpty`, `RawBodyEmpty` |
//! | `Expression` | `Pattern`, `JsonPath`, `XPath`, `ExpressionTooLong` |

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ExtractLocation, ExtractMethod};
use crate::message::Diagnostic;

/// Result type alias using [`ExtractError`].
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Broad classification of extraction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The extraction configuration is incomplete.
    Configuration,
    /// The exchange does not hold the requested data.
    Context,
    /// A pattern or path expression could not be compiled or evaluated.
    Expression,
}

/// Failure to compile a slash-delimited pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Nothing to compile.
    #[error("pattern is empty")]
    Empty,

    /// A flag letter outside the supported set.
    #[error("unknown regex flag '{0}'")]
    UnknownFlag(char),

    /// The same flag given twice.
    #[error("duplicate regex flag '{0}'")]
    DuplicateFlag(char),

    /// Pattern exceeds the configured length budget.
    #[error("pattern is {length} characters long, limit is {limit}")]
    TooLong {
        /// Length of the pattern body.
        length: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// The regex engine rejected the pattern (syntax, unsupported feature, size limit).
    #[error("invalid pattern: {0}")]
    Syntax(String),
}

/// Error produced while extracting a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No location configured.
    #[error("extraction location is not configured")]
    MissingLocation,

    /// No method configured.
    #[error("extraction method is not configured")]
    MissingMethod,

    /// A name-scoped location without a parameter name.
    #[error("parameter name is required to extract a {location}")]
    MissingParameterName {
        /// The configured location.
        location: ExtractLocation,
    },

    /// A pattern or path method without an expression.
    #[error("{method} expression is not configured")]
    MissingExpression {
        /// The configured method.
        method: ExtractMethod,
    },

    /// The container for a name-scoped location was absent or empty.
    #[error("no {location} values were captured")]
    ContainerEmpty {
        /// The configured location.
        location: ExtractLocation,
    },

    /// The container exists but does not hold the requested name.
    #[error("{location} '{name}' was not found")]
    ParameterNotFound {
        /// The configured location.
        location: ExtractLocation,
        /// The requested name.
        name: String,
    },

    /// The response body data is null.
    #[error("response body is empty")]
    ResponseBodyEmpty,

    /// The raw request body is null.
    #[error("request raw body is empty")]
    RawBodyEmpty,

    /// The regex pattern could not be compiled.
    #[error("regex error: {0}")]
    Pattern(#[from] PatternError),

    /// The JSONPath expression could not be parsed or evaluated.
    #[error("jsonpath expression error: {detail}")]
    JsonPath {
        /// Engine-provided explanation.
        detail: String,
    },

    /// The XPath expression or the markup could not be processed.
    #[error("xpath expression error: {detail}")]
    XPath {
        /// Engine-provided explanation.
        detail: String,
    },

    /// A path expression exceeds the configured length budget.
    #[error("{method} expression is {length} characters long, limit is {limit}")]
    ExpressionTooLong {
        /// The configured method.
        method: ExtractMethod,
        /// Expression length.
        length: usize,
        /// Configured maximum.
        limit: usize,
    },
}

impl ExtractError {
    /// Creates a JSONPath error.
    pub fn json_path(detail: impl Into<String>) -> Self {
        Self::JsonPath {
            detail: detail.into(),
        }
    }

    /// Creates an XPath error.
    pub fn xpath(detail: impl Into<String>) -> Self {
        Self::XPath {
            detail: detail.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingLocation
            | Self::MissingMethod
            | Self::MissingParameterName { .. }
            | Self::MissingExpression { .. } => ErrorCategory::Configuration,
            Self::ContainerEmpty { .. }
            | Self::ParameterNotFound { .. }
            | Self::ResponseBodyEmpty
            | Self::RawBodyEmpty => ErrorCategory::Context,
            Self::Pattern(_)
            | Self::JsonPath { .. }
            | Self::XPath { .. }
            | Self::ExpressionTooLong { .. } => ErrorCategory::Expression,
        }
    }

    /// Returns a stable error code for logs and metrics.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingLocation => "MISSING_LOCATION",
            Self::MissingMethod => "MISSING_METHOD",
            Self::MissingParameterName { .. } => "MISSING_PARAMETER_NAME",
            Self::MissingExpression { .. } => "MISSING_EXPRESSION",
            Self::ContainerEmpty { .. } => "CONTAINER_EMPTY",
            Self::ParameterNotFound { .. } => "PARAMETER_NOT_FOUND",
            Self::ResponseBodyEmpty => "RESPONSE_BODY_EMPTY",
            Self::RawBodyEmpty => "RAW_BODY_EMPTY",
            Self::Pattern(_) => "REGEX_ERROR",
            Self::JsonPath { .. } => "JSONPATH_ERROR",
            Self::XPath { .. } => "XPATH_ERROR",
            Self::ExpressionTooLong { .. } => "EXPRESSION_TOO_LONG",
        }
    }

    /// Returns the user-facing diagnostic this error renders as.
    #[must_use]
    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            Self::MissingLocation => Diagnostic::LocationMissing,
            Self::MissingMethod => Diagnostic::MethodMissing,
            Self::MissingParameterName { location } => Diagnostic::ParameterNameMissing {
                location: *location,
            },
            Self::MissingExpression { method } => Diagnostic::ExpressionMissing { method: *method },
            Self::ContainerEmpty { location } => Diagnostic::ContainerEmpty {
                location: *location,
            },
            Self::ParameterNotFound { location, name } => Diagnostic::ParameterNotFound {
                location: *location,
                name: name.clone(),
            },
            Self::ResponseBodyEmpty => Diagnostic::ResponseBodyEmpty,
            Self::RawBodyEmpty => Diagnostic::RawBodyEmpty,
            Self::Pattern(_) => Diagnostic::RegexError,
            Self::JsonPath { .. } => Diagnostic::JsonPathError,
            Self::XPath { .. } => Diagnostic::XPathError,
            Self::ExpressionTooLong { method, .. } => match method {
                ExtractMethod::XPath => Diagnostic::XPathError,
                ExtractMethod::Regex => Diagnostic::RegexError,
                ExtractMethod::JsonPath | ExtractMethod::ExactValue => Diagnostic::JsonPathError,
            },
        }
    }
}
