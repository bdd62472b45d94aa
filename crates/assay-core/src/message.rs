//! Diagnostic messages.
//!
//! The engine never produces text directly. It reports a [`Diagnostic`] and
//! lets a [`MessageFormatter`] phrase it, either plainly (for
//! `errorMessage`) or default-aware (for `message`, when a default value
//! stood in for the missing result). Host applications inject their own
//! formatter to localize; [`EnglishMessages`] is the built-in one.

use std::fmt;

use crate::config::{ExtractLocation, ExtractMethod};

/// A user-facing condition reported by an extraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// No location configured.
    LocationMissing,
    /// No method configured.
    MethodMissing,
    /// Name-scoped location without a parameter name.
    ParameterNameMissing {
        /// The configured location.
        location: ExtractLocation,
    },
    /// Pattern or path method without an expression.
    ExpressionMissing {
        /// The configured method.
        method: ExtractMethod,
    },
    /// The container for the location holds nothing.
    ContainerEmpty {
        /// The configured location.
        location: ExtractLocation,
    },
    /// The container does not hold the requested name.
    ParameterNotFound {
        /// The configured location.
        location: ExtractLocation,
        /// The requested name.
        name: String,
    },
    /// No response body data.
    ResponseBodyEmpty,
    /// No raw request body.
    RawBodyEmpty,
    /// The pattern could not be compiled.
    RegexError,
    /// The JSONPath expression failed.
    JsonPathError,
    /// The XPath expression failed.
    XPathError,
    /// The query ran but matched nothing.
    ExtractedValueEmpty,
}

impl Diagnostic {
    /// Stable key for message catalogues (e.g. `extract.regex_error`).
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::LocationMissing => "extract.location_missing",
            Self::MethodMissing => "extract.method_missing",
            Self::ParameterNameMissing { .. } => "extract.parameter_name_missing",
            Self::ExpressionMissing { .. } => "extract.expression_missing",
            Self::ContainerEmpty { .. } => "extract.container_empty",
            Self::ParameterNotFound { .. } => "extract.parameter_not_found",
            Self::ResponseBodyEmpty => "extract.response_body_empty",
            Self::RawBodyEmpty => "extract.raw_body_empty",
            Self::RegexError => "extract.regex_error",
            Self::JsonPathError => "extract.jsonpath_error",
            Self::XPathError => "extract.xpath_error",
            Self::ExtractedValueEmpty => "extract.value_empty",
        }
    }
}

/// Renders diagnostics into human-readable text.
///
/// `default_used` is `true` when a configured default value replaced the
/// missing result; formatters should then say so.
pub trait MessageFormatter: Send + Sync {
    /// Formats one diagnostic.
    fn format(&self, diagnostic: &Diagnostic, default_used: bool) -> String;
}

/// Built-in English wording.
///
/// # Example
///
/// ```
/// use assay_core::{Diagnostic, EnglishMessages, MessageFormatter};
///
/// let messages = EnglishMessages;
/// assert_eq!(messages.format(&Diagnostic::RegexError, false), "regex error");
/// assert_eq!(
///     messages.format(&Diagnostic::RegexError, true),
///     "regex error, default value was used"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl EnglishMessages {
    /// Suffix appended when a default value stood in.
    pub const DEFAULT_USED_SUFFIX: &'static str = ", default value was used";

    fn base(diagnostic: &Diagnostic) -> String {
        match diagnostic {
            Diagnostic::LocationMissing => "extraction location is not configured".to_string(),
            Diagnostic::MethodMissing => "extraction method is not configured".to_string(),
            Diagnostic::ParameterNameMissing { location } => {
                format!("parameter name is required to extract a {location}")
            }
            Diagnostic::ExpressionMissing { method } => {
                format!("{method} expression is not configured")
            }
            Diagnostic::ContainerEmpty { location } => {
                format!("no {location} values were captured")
            }
            Diagnostic::ParameterNotFound { location, name } => {
                format!("{location} '{name}' was not found")
            }
            Diagnostic::ResponseBodyEmpty => "response body is empty".to_string(),
            Diagnostic::RawBodyEmpty => "request raw body is empty".to_string(),
            Diagnostic::RegexError => "regex error".to_string(),
            Diagnostic::JsonPathError => "jsonpath expression error".to_string(),
            Diagnostic::XPathError => "xpath expression error".to_string(),
            Diagnostic::ExtractedValueEmpty => "extracted value empty".to_string(),
        }
    }
}

impl MessageFormatter for EnglishMessages {
    fn format(&self, diagnostic: &Diagnostic, default_used: bool) -> String {
        let base = Self::base(diagnostic);
        if default_used {
            format!("{base}{}", Self::DEFAULT_USED_SUFFIX)
        } else {
            base
        }
    }
}

/// Adapts a closure into a [`MessageFormatter`].
///
/// # Example
///
/// ```
/// use assay_core::{Diagnostic, FnFormatter, MessageFormatter};
///
/// let formatter = FnFormatter::new(|d: &Diagnostic, default_used: bool| {
///     format!("{}{}", d.key(), if default_used { "+default" } else { "" })
/// });
/// assert_eq!(formatter.format(&Diagnostic::XPathError, true), "extract.xpath_error+default");
/// ```
pub struct FnFormatter<F> {
    render: F,
}

impl<F> FnFormatter<F>
where
    F: Fn(&Diagnostic, bool) -> String + Send + Sync,
{
    /// Wraps a rendering closure.
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

impl<F> MessageFormatter for FnFormatter<F>
where
    F: Fn(&Diagnostic, bool) -> String + Send + Sync,
{
    fn format(&self, diagnostic: &Diagnostic, default_used: bool) -> String {
        (self.render)(diagnostic, default_used)
    }
}

impl<F> fmt::Debug for FnFormatter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFormatter").finish_non_exhaustive()
    }
}
