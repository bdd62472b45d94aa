//! JSONPath strategy.

use assay_core::value::stringify;
use assay_core::{EngineLimits, ExtractError, ExtractMethod, ExtractResult};
use serde_json::Value;
use serde_json_path::JsonPath;

use super::{check_expression_length, select_from_results, Selection, Strategy, StrategyInput};

/// Queries structured data with an RFC 9535 JSONPath expression.
///
/// A string candidate holding JSON text is parsed first; any other string
/// is queried as a JSON string scalar. With several results and no
/// `matchItem`, the whole result array is returned as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathStrategy {
    limits: EngineLimits,
}

impl JsonPathStrategy {
    /// Creates a JSONPath strategy with the given limits.
    #[must_use]
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }
}

impl Strategy for JsonPathStrategy {
    fn method(&self) -> ExtractMethod {
        ExtractMethod::JsonPath
    }

    fn select(&self, input: StrategyInput<'_>) -> ExtractResult<Selection> {
        check_expression_length(self.method(), input.expression, &self.limits)?;

        let path = JsonPath::parse(input.expression)
            .map_err(|e| ExtractError::json_path(e.to_string()))?;

        let parsed;
        let document = match input.data {
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(value) => {
                    parsed = value;
                    &parsed
                }
                Err(_) => input.data,
            },
            other => other,
        };

        let results = path.query(document).all();
        Ok(select_from_results(
            results,
            input.match_item,
            Selection::from_value,
            |all| Selection::Found(stringify(&Value::Array(all.into_iter().cloned().collect()))),
        ))
    }
}
