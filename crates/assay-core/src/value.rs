//! Candidate value helpers.
//!
//! Located data is carried as a [`serde_json::Value`] and only turned into a
//! string at the strategy boundary. These helpers define the two conversions
//! every strategy shares: the emptiness predicate and stringification.

use serde_json::Value;

/// Returns `true` when a located value carries nothing usable.
///
/// `null`, the empty string, the empty array and the empty object are empty.
/// Numbers and booleans never are, including `0` and `false`.
///
/// # Example
///
/// ```
/// use assay_core::value::is_empty_value;
/// use serde_json::json;
///
/// assert!(is_empty_value(&json!(null)));
/// assert!(is_empty_value(&json!({})));
/// assert!(!is_empty_value(&json!(0)));
/// ```
#[must_use]
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Converts a value to the string handed back to callers.
///
/// Strings are returned verbatim; every other variant is serialized as
/// compact JSON, so `{"a":1}` stays parseable.
///
/// # Example
///
/// ```
/// use assay_core::value::stringify;
/// use serde_json::json;
///
/// assert_eq!(stringify(&json!("plain")), "plain");
/// assert_eq!(stringify(&json!(9)), "9");
/// assert_eq!(stringify(&json!({"id": 9})), r#"{"id":9}"#);
/// ```
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerces a raw `matchItem` into a zero-based index.
///
/// Accepts non-negative integral numbers and strings holding one. Anything
/// else (negative, fractional, non-numeric, blank) is treated as unset.
///
/// # Example
///
/// ```
/// use assay_core::value::coerce_match_item;
/// use serde_json::json;
///
/// assert_eq!(coerce_match_item(&json!(2)), Some(2));
/// assert_eq!(coerce_match_item(&json!("1")), Some(1));
/// assert_eq!(coerce_match_item(&json!("first")), None);
/// ```
#[must_use]
pub fn coerce_match_item(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().and_then(integral))
            .and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<usize>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(integral)
                    .and_then(|n| usize::try_from(n).ok())
            })
        }
        _ => None,
    }
}

fn integral(n: f64) -> Option<u64> {
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 {
        Some(n as u64)
    } else {
        None
    }
}
