//! Extraction configuration.
//!
//! An [`ExtractionConfig`] is built by the assertion layer for every
//! evaluation. It deserializes from the camelCase wire shape used by test
//! definitions and is never mutated by the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::value::coerce_match_item;

/// Region of an HTTP exchange that a raw value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractLocation {
    /// URL-encoded or multipart form field of the request.
    FormParameter,
    /// Templated path segment of the request URL.
    PathParameter,
    /// Query string parameter of the request URL.
    QueryParameter,
    /// Request header (case-insensitive name).
    RequestHeader,
    /// Response header (case-insensitive name).
    ResponseHeader,
    /// Whole response body.
    ResponseBody,
    /// Raw request body as sent.
    RequestRawBody,
}

impl ExtractLocation {
    /// All locations, in wire order.
    pub const ALL: [Self; 7] = [
        Self::FormParameter,
        Self::PathParameter,
        Self::QueryParameter,
        Self::RequestHeader,
        Self::ResponseHeader,
        Self::ResponseBody,
        Self::RequestRawBody,
    ];

    /// Returns the wire name (e.g. `QUERY_PARAMETER`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FormParameter => "FORM_PARAMETER",
            Self::PathParameter => "PATH_PARAMETER",
            Self::QueryParameter => "QUERY_PARAMETER",
            Self::RequestHeader => "REQUEST_HEADER",
            Self::ResponseHeader => "RESPONSE_HEADER",
            Self::ResponseBody => "RESPONSE_BODY",
            Self::RequestRawBody => "REQUEST_RAW_BODY",
        }
    }

    /// Whether a `parameterName` is needed to pick a value at this location.
    #[must_use]
    pub const fn requires_parameter_name(&self) -> bool {
        !matches!(self, Self::ResponseBody | Self::RequestRawBody)
    }

    /// Whether names at this location compare case-insensitively.
    #[must_use]
    pub const fn is_header(&self) -> bool {
        matches!(self, Self::RequestHeader | Self::ResponseHeader)
    }
}

impl fmt::Display for ExtractLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormParameter => write!(f, "form parameter"),
            Self::PathParameter => write!(f, "path parameter"),
            Self::QueryParameter => write!(f, "query parameter"),
            Self::RequestHeader => write!(f, "request header"),
            Self::ResponseHeader => write!(f, "response header"),
            Self::ResponseBody => write!(f, "response body"),
            Self::RequestRawBody => write!(f, "request raw body"),
        }
    }
}

impl FromStr for ExtractLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or_else(|| format!("unknown extraction location: {s}"))
    }
}

/// Strategy used to derive the final value from the located data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractMethod {
    /// Use the located value as-is.
    ExactValue,
    /// Match a slash-delimited regular expression.
    Regex,
    /// Query structured data with a JSONPath expression.
    JsonPath,
    /// Query markup with an XPath 1.0 expression.
    XPath,
}

impl ExtractMethod {
    /// All methods, in wire order.
    pub const ALL: [Self; 4] = [Self::ExactValue, Self::Regex, Self::JsonPath, Self::XPath];

    /// Returns the wire name (e.g. `JSON_PATH`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ExactValue => "EXACT_VALUE",
            Self::Regex => "REGEX",
            Self::JsonPath => "JSON_PATH",
            Self::XPath => "X_PATH",
        }
    }

    /// Whether this method needs an `expression`.
    #[must_use]
    pub const fn requires_expression(&self) -> bool {
        !matches!(self, Self::ExactValue)
    }
}

impl fmt::Display for ExtractMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactValue => write!(f, "exact value"),
            Self::Regex => write!(f, "regex"),
            Self::JsonPath => write!(f, "jsonpath"),
            Self::XPath => write!(f, "xpath"),
        }
    }
}

impl FromStr for ExtractMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| format!("unknown extraction method: {s}"))
    }
}

/// Declarative extraction configuration.
///
/// Every field is optional on the wire; missing pieces are reported by the
/// engine as configuration errors rather than rejected at parse time.
/// Unknown `location`/`method` names deserialize as absent.
///
/// # Example
///
/// ```
/// use assay_core::{ExtractLocation, ExtractMethod, ExtractionConfig};
///
/// let config: ExtractionConfig = serde_json::from_str(r#"{
///     "location": "QUERY_PARAMETER",
///     "method": "REGEX",
///     "parameterName": "id",
///     "expression": "/(\\d+)/",
///     "matchItem": "1"
/// }"#).unwrap();
///
/// assert_eq!(config.location, Some(ExtractLocation::QueryParameter));
/// assert_eq!(config.method, Some(ExtractMethod::Regex));
/// assert_eq!(config.match_item, Some(1));
/// assert_eq!(config.default_value(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionConfig {
    /// Where the raw value is read from.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub location: Option<ExtractLocation>,

    /// How the final value is derived.
    #[serde(default, deserialize_with = "lenient_enum")]
    pub method: Option<ExtractMethod>,

    /// Name of the parameter or header to read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,

    /// Fallback used whenever extraction yields nothing usable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Pattern or path expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Zero-based index selecting one of several matches.
    #[serde(
        default,
        deserialize_with = "lenient_match_item",
        skip_serializing_if = "Option::is_none"
    )]
    pub match_item: Option<usize>,
}

impl ExtractionConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }

    /// Returns the default value, normalized so absent means `""`.
    #[must_use]
    pub fn default_value(&self) -> &str {
        self.default_value.as_deref().unwrap_or("")
    }

    /// Whether a non-empty default value is configured.
    #[must_use]
    pub fn has_default(&self) -> bool {
        !self.default_value().is_empty()
    }

    /// Returns the parameter name if one is configured and non-empty.
    #[must_use]
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameter_name.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns the expression if one is configured and non-empty.
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        self.expression.as_deref().filter(|expr| !expr.is_empty())
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug, Default)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    /// Sets the location.
    #[must_use]
    pub fn location(mut self, location: ExtractLocation) -> Self {
        self.config.location = Some(location);
        self
    }

    /// Sets the method.
    #[must_use]
    pub fn method(mut self, method: ExtractMethod) -> Self {
        self.config.method = Some(method);
        self
    }

    /// Sets the parameter name.
    #[must_use]
    pub fn parameter_name(mut self, name: impl Into<String>) -> Self {
        self.config.parameter_name = Some(name.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.config.default_value = Some(value.into());
        self
    }

    /// Sets the expression.
    #[must_use]
    pub fn expression(mut self, expression: impl Into<String>) -> Self {
        self.config.expression = Some(expression.into());
        self
    }

    /// Sets the match item.
    #[must_use]
    pub fn match_item(mut self, index: usize) -> Self {
        self.config.match_item = Some(index);
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ExtractionConfig {
        self.config
    }
}

// Empty strings, nulls and unknown names all read as "not configured".
fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(name)) => name.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_match_item<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(coerce_match_item))
}
