//! Extraction strategies.
//!
//! A [`Strategy`] turns a located candidate into a [`Selection`]. Strategies
//! never substitute defaults or phrase messages: they report what they
//! found, or an [`ExtractError`], and the orchestrator applies the fallback
//! policy.

mod exact;
mod json_path;
mod regex;
mod xpath;

pub use exact::ExactValueStrategy;
pub use json_path::JsonPathStrategy;
pub use regex::RegexStrategy;
pub use xpath::XPathStrategy;

use assay_core::value::{is_empty_value, stringify};
use assay_core::{EngineLimits, ExtractError, ExtractMethod, ExtractResult, MissReason};
use serde_json::Value;

/// Input handed to a strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyInput<'a> {
    /// Located candidate data.
    pub data: &'a Value,
    /// Pattern or path expression (empty for exact value).
    pub expression: &'a str,
    /// Coerced match index.
    pub match_item: Option<usize>,
}

/// What a strategy selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A usable, stringified value.
    Found(String),
    /// Nothing usable; the reason tells the orchestrator how to report it.
    Miss(MissReason),
}

impl Selection {
    /// Selects a JSON value, treating empty values as an empty selection.
    pub(crate) fn from_value(value: &Value) -> Self {
        if is_empty_value(value) {
            Self::Miss(MissReason::EmptySelection)
        } else {
            Self::Found(stringify(value))
        }
    }

    /// Selects a string, treating `None` and `""` as an empty selection.
    pub(crate) fn from_text(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.is_empty() => Self::Found(text),
            _ => Self::Miss(MissReason::EmptySelection),
        }
    }
}

/// A way of deriving the final value from located data.
pub trait Strategy: Send + Sync {
    /// The method this strategy implements.
    fn method(&self) -> ExtractMethod;

    /// Selects a value from the candidate.
    fn select(&self, input: StrategyInput<'_>) -> ExtractResult<Selection>;
}

/// Rejects path expressions longer than the configured limit.
pub(crate) fn check_expression_length(
    method: ExtractMethod,
    expression: &str,
    limits: &EngineLimits,
) -> ExtractResult<()> {
    let length = expression.chars().count();
    if length > limits.max_expression_length {
        return Err(ExtractError::ExpressionTooLong {
            method,
            length,
            limit: limits.max_expression_length,
        });
    }
    Ok(())
}

/// Applies the shared result-count policy to path query results.
///
/// Zero results is a clean miss and one result is taken as-is. Several
/// results go through `match_item` when set; otherwise `combine` folds them.
pub(crate) fn select_from_results<T>(
    mut results: Vec<T>,
    match_item: Option<usize>,
    pick: impl Fn(T) -> Selection,
    combine: impl FnOnce(Vec<T>) -> Selection,
) -> Selection {
    match results.len() {
        0 => Selection::Miss(MissReason::NoMatch),
        1 => pick(results.remove(0)),
        _ => match match_item {
            Some(index) if index < results.len() => pick(results.swap_remove(index)),
            Some(_) => Selection::Miss(MissReason::EmptySelection),
            None => combine(results),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selection_from_value() {
        assert_eq!(Selection::from_value(&json!(9)), Selection::Found("9".into()));
        assert_eq!(
            Selection::from_value(&json!(null)),
            Selection::Miss(MissReason::EmptySelection)
        );
    }

    #[test]
    fn test_selection_from_text() {
        assert_eq!(Selection::from_text(Some("a".into())), Selection::Found("a".into()));
        assert_eq!(
            Selection::from_text(Some(String::new())),
            Selection::Miss(MissReason::EmptySelection)
        );
        assert_eq!(Selection::from_text(None), Selection::Miss(MissReason::EmptySelection));
    }

    #[test]
    fn test_expression_length_limit() {
        let limits = EngineLimits {
            max_expression_length: 3,
            ..EngineLimits::default()
        };
        assert!(check_expression_length(ExtractMethod::XPath, "/a", &limits).is_ok());
        assert_eq!(
            check_expression_length(ExtractMethod::JsonPath, "$.abc", &limits),
            Err(ExtractError::ExpressionTooLong {
                method: ExtractMethod::JsonPath,
                length: 5,
                limit: 3,
            })
        );
    }

    #[test]
    fn test_result_count_policy() {
        let pick = |s: &str| Selection::Found(s.to_string());
        let join = |all: Vec<&str>| Selection::Found(all.concat());

        assert_eq!(
            select_from_results(Vec::<&str>::new(), None, pick, join),
            Selection::Miss(MissReason::NoMatch)
        );
        assert_eq!(select_from_results(vec!["a"], Some(5), pick, join), pick("a"));
        assert_eq!(select_from_results(vec!["a", "b", "c"], None, pick, join), pick("abc"));
        assert_eq!(select_from_results(vec!["a", "b", "c"], Some(0), pick, join), pick("a"));
        assert_eq!(select_from_results(vec!["a", "b", "c"], Some(2), pick, join), pick("c"));
        assert_eq!(
            select_from_results(vec!["a", "b"], Some(2), pick, join),
            Selection::Miss(MissReason::EmptySelection)
        );
    }
}
