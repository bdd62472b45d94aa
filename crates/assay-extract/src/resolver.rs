//! Location resolution.
//!
//! Maps an [`ExtractLocation`] (plus parameter name where one is needed) to
//! the candidate value inside an [`ExchangeContext`]. Resolution never
//! copies: the candidate borrows from the context.

use assay_core::{ExchangeContext, ExtractError, ExtractLocation, ExtractResult, ParameterMap};
use serde_json::Value;

/// Resolves the candidate value for `location`.
///
/// # Errors
///
/// - [`ExtractError::MissingParameterName`] when a name-scoped location is
///   given no name.
/// - [`ExtractError::ContainerEmpty`] when the container is absent or empty.
/// - [`ExtractError::ParameterNotFound`] when the container lacks the name.
/// - [`ExtractError::ResponseBodyEmpty`] / [`ExtractError::RawBodyEmpty`]
///   when the body is null.
pub fn resolve<'a>(
    location: ExtractLocation,
    parameter_name: Option<&str>,
    context: &'a ExchangeContext,
) -> ExtractResult<&'a Value> {
    if !location.requires_parameter_name() {
        return resolve_body(location, context);
    }

    let name = parameter_name.ok_or(ExtractError::MissingParameterName { location })?;
    let container = context
        .container(location)
        .filter(|map| !map.is_empty())
        .ok_or(ExtractError::ContainerEmpty { location })?;

    let found = if location.is_header() {
        lookup_header(container, name)
    } else {
        container.get(name)
    };

    found.ok_or_else(|| ExtractError::ParameterNotFound {
        location,
        name: name.to_string(),
    })
}

// Whole-body locations ignore any parameter name.
fn resolve_body(location: ExtractLocation, context: &ExchangeContext) -> ExtractResult<&Value> {
    if location == ExtractLocation::ResponseBody {
        let data = context.response_data();
        if data.is_null() {
            Err(ExtractError::ResponseBodyEmpty)
        } else {
            Ok(data)
        }
    } else if context.raw_body.is_null() {
        Err(ExtractError::RawBodyEmpty)
    } else {
        Ok(&context.raw_body)
    }
}

// Header names compare case-insensitively; the first key in insertion order wins.
fn lookup_header<'a>(headers: &'a ParameterMap, name: &str) -> Option<&'a Value> {
    let wanted = name.to_lowercase();
    headers
        .iter()
        .find(|(key, _)| key.to_lowercase() == wanted)
        .map(|(_, value)| value)
}
