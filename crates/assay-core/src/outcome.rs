//! Extraction outcomes.
//!
//! [`Extraction`] is the typed outcome the engine produces. It is rendered
//! into the flat [`ExtractionResult`] triple only at the boundary, where
//! callers expect `{ data, message, errorMessage }`.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::message::{Diagnostic, MessageFormatter};

/// Why an extraction produced no value without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// The located value was null or empty.
    EmptyCandidate,
    /// The pattern or path query matched nothing.
    NoMatch,
    /// Something matched, but the selected item is absent or empty.
    EmptySelection,
}

/// Typed outcome of one extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A value was extracted.
    Extracted {
        /// The extracted value, already stringified.
        value: String,
    },
    /// Nothing usable was found; not an error.
    Miss {
        /// What was missing.
        reason: MissReason,
        /// Normalized default value (`""` when none is configured).
        default_value: String,
    },
    /// Extraction logically failed.
    Failed {
        /// The failure.
        error: ExtractError,
        /// Normalized default value (`""` when none is configured).
        default_value: String,
    },
}

impl Extraction {
    /// Creates an extracted outcome.
    pub fn extracted(value: impl Into<String>) -> Self {
        Self::Extracted {
            value: value.into(),
        }
    }

    /// Creates a miss outcome.
    pub fn miss(reason: MissReason, default_value: impl Into<String>) -> Self {
        Self::Miss {
            reason,
            default_value: default_value.into(),
        }
    }

    /// Creates a failed outcome.
    pub fn failed(error: ExtractError, default_value: impl Into<String>) -> Self {
        Self::Failed {
            error,
            default_value: default_value.into(),
        }
    }

    /// Returns the value a caller should compare against: the extracted
    /// value, or the default value for misses and failures.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Extracted { value } => value,
            Self::Miss { default_value, .. } | Self::Failed { default_value, .. } => default_value,
        }
    }

    /// Returns the error for failed outcomes.
    #[must_use]
    pub fn error(&self) -> Option<&ExtractError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether extraction logically failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short label used in logs and metrics.
    #[must_use]
    pub const fn outcome_label(&self) -> &'static str {
        match self {
            Self::Extracted { .. } => "extracted",
            Self::Miss { .. } => "miss",
            Self::Failed { .. } => "failed",
        }
    }

    /// Renders the outcome into the boundary triple.
    ///
    /// - extracted: `{ value, "", "" }`
    /// - miss because nothing matched: `{ default, <value empty>, "" }`
    /// - other misses: `{ default, "", "" }`
    /// - failure: `{ default, <default-aware text>, <plain text> }`
    #[must_use]
    pub fn into_result(self, formatter: &dyn MessageFormatter) -> ExtractionResult {
        match self {
            Self::Extracted { value } => ExtractionResult {
                data: value,
                message: String::new(),
                error_message: String::new(),
            },
            Self::Miss {
                reason,
                default_value,
            } => {
                let message = if reason == MissReason::NoMatch {
                    formatter.format(&Diagnostic::ExtractedValueEmpty, !default_value.is_empty())
                } else {
                    String::new()
                };
                ExtractionResult {
                    data: default_value,
                    message,
                    error_message: String::new(),
                }
            }
            Self::Failed {
                error,
                default_value,
            } => {
                let diagnostic = error.diagnostic();
                ExtractionResult {
                    message: formatter.format(&diagnostic, !default_value.is_empty()),
                    error_message: formatter.format(&diagnostic, false),
                    data: default_value,
                }
            }
        }
    }
}

/// The `{ data, message, errorMessage }` shape read by assertion evaluators.
///
/// `error_message` is non-empty exactly when extraction logically failed;
/// `message` is a user-facing note (empty on a clean success).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted value, or the default value, or `""`.
    pub data: String,
    /// Human-readable note.
    pub message: String,
    /// Hard-failure description; empty unless extraction failed.
    pub error_message: String,
}

impl ExtractionResult {
    /// Whether extraction logically failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}
