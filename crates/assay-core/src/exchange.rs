//! Captured HTTP exchange.
//!
//! The [`ExchangeContext`] is the read-only snapshot an extraction runs
//! against. Parameter containers keep insertion order so that the first
//! case-insensitive header match is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ExtractLocation;

/// Ordered map of parameter or header name to captured value.
pub type ParameterMap = IndexMap<String, Value>;

/// Captured response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseBody {
    /// Decoded body: structured JSON when the response was JSON, text otherwise.
    pub data: Value,
    /// Body size in bytes as reported by the client.
    pub size: u64,
}

impl ResponseBody {
    /// Creates a response body, computing `size` from the serialized data.
    #[must_use]
    pub fn new(data: impl Into<Value>) -> Self {
        let data = data.into();
        let size = match &data {
            Value::Null => 0,
            Value::String(s) => s.len() as u64,
            other => other.to_string().len() as u64,
        };
        Self { data, size }
    }
}

/// Snapshot of one HTTP exchange.
///
/// Every field is optional. `status` and `duration` are carried for
/// callers but never consulted during extraction.
///
/// # Example
///
/// ```
/// use assay_core::{ExchangeContext, ExtractLocation};
///
/// let ctx: ExchangeContext = serde_json::from_str(r#"{
///     "query": { "id": "42" },
///     "responseHeader": { "content-type": "application/json" },
///     "responseBody": { "data": { "ok": true }, "size": 11 }
/// }"#).unwrap();
///
/// let query = ctx.container(ExtractLocation::QueryParameter).unwrap();
/// assert_eq!(query["id"], "42");
/// assert_eq!(ctx.response_data()["ok"], true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExchangeContext {
    /// Form parameters of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<ParameterMap>,

    /// Query parameters of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<ParameterMap>,

    /// Path parameters of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ParameterMap>,

    /// Request headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<ParameterMap>,

    /// Response headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_header: Option<ParameterMap>,

    /// Response body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_body: Option<ResponseBody>,

    /// Raw request body as sent.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub raw_body: Value,

    /// Response status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Round-trip duration in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl ExchangeContext {
    /// Creates a new exchange builder.
    #[must_use]
    pub fn builder() -> ExchangeContextBuilder {
        ExchangeContextBuilder::default()
    }

    /// Returns the parameter container backing a name-scoped location.
    ///
    /// Returns `None` for the body locations and for containers that were
    /// never captured.
    #[must_use]
    pub fn container(&self, location: ExtractLocation) -> Option<&ParameterMap> {
        match location {
            ExtractLocation::FormParameter => self.form.as_ref(),
            ExtractLocation::PathParameter => self.path.as_ref(),
            ExtractLocation::QueryParameter => self.query.as_ref(),
            ExtractLocation::RequestHeader => self.header.as_ref(),
            ExtractLocation::ResponseHeader => self.response_header.as_ref(),
            ExtractLocation::ResponseBody | ExtractLocation::RequestRawBody => None,
        }
    }

    /// Returns the response body data, or `null` when there is none.
    #[must_use]
    pub fn response_data(&self) -> &Value {
        self.response_body
            .as_ref()
            .map_or(&Value::Null, |body| &body.data)
    }
}

/// Builder for constructing an [`ExchangeContext`].
#[derive(Debug, Default)]
pub struct ExchangeContextBuilder {
    context: ExchangeContext,
}

impl ExchangeContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a form parameter.
    #[must_use]
    pub fn form(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        insert(&mut self.context.form, name, value);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        insert(&mut self.context.query, name, value);
        self
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn path(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        insert(&mut self.context.path, name, value);
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        insert(&mut self.context.header, name, value);
        self
    }

    /// Adds a response header.
    #[must_use]
    pub fn response_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        insert(&mut self.context.response_header, name, value);
        self
    }

    /// Sets the response body.
    #[must_use]
    pub fn response_body(mut self, data: impl Into<Value>) -> Self {
        self.context.response_body = Some(ResponseBody::new(data));
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn raw_body(mut self, body: impl Into<Value>) -> Self {
        self.context.raw_body = body.into();
        self
    }

    /// Sets the response status code.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.context.status = Some(status);
        self
    }

    /// Sets the round-trip duration in milliseconds.
    #[must_use]
    pub fn duration(mut self, millis: f64) -> Self {
        self.context.duration = Some(millis);
        self
    }

    /// Builds the exchange context.
    #[must_use]
    pub fn build(self) -> ExchangeContext {
        self.context
    }
}

fn insert(container: &mut Option<ParameterMap>, name: impl Into<String>, value: impl Into<Value>) {
    container
        .get_or_insert_with(ParameterMap::new)
        .insert(name.into(), value.into());
}
