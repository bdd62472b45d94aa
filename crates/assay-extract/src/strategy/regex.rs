//! Regex strategy.

use assay_core::value::stringify;
use assay_core::{EngineLimits, ExtractMethod, ExtractResult, MissReason};

use super::{Selection, Strategy, StrategyInput};
use crate::pattern::CompiledPattern;

/// Matches a slash-delimited pattern against the stringified candidate.
///
/// Without `matchItem` the whole match (group 0) is selected; with it, the
/// group (or, for global patterns, the match) at that index.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexStrategy {
    limits: EngineLimits,
}

impl RegexStrategy {
    /// Creates a regex strategy with the given limits.
    #[must_use]
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }
}

impl Strategy for RegexStrategy {
    fn method(&self) -> ExtractMethod {
        ExtractMethod::Regex
    }

    fn select(&self, input: StrategyInput<'_>) -> ExtractResult<Selection> {
        let pattern = CompiledPattern::compile_with(input.expression, &self.limits)?;
        let text = stringify(input.data);

        let Some(mut groups) = pattern.matches(&text) else {
            return Ok(Selection::Miss(MissReason::NoMatch));
        };

        let index = input.match_item.unwrap_or(0);
        let picked = if index < groups.len() {
            groups.swap_remove(index)
        } else {
            None
        };
        Ok(Selection::from_text(picked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay_core::{ExtractError, PatternError};
    use serde_json::{json, Value};

    fn select(data: &Value, expression: &str, match_item: Option<usize>) -> ExtractResult<Selection> {
        RegexStrategy::default().select(StrategyInput {
            data,
            expression,
            match_item,
        })
    }

    #[test]
    fn test_whole_match_by_default() {
        let result = select(&json!("order-7781"), r"/(\d+)/", None).unwrap();
        assert_eq!(result, Selection::Found("7781".into()));
    }

    #[test]
    fn test_match_item_selects_group() {
        let data = json!("user=alice; id=17");
        let result = select(&data, r"/user=(\w+); id=(\d+)/", Some(2)).unwrap();
        assert_eq!(result, Selection::Found("17".into()));
    }

    #[test]
    fn test_match_item_out_of_range() {
        let result = select(&json!("abc"), "/(b)/", Some(5)).unwrap();
        assert_eq!(result, Selection::Miss(MissReason::EmptySelection));
    }

    #[test]
    fn test_non_participating_group_is_empty() {
        let result = select(&json!("b"), "/(a)|(b)/", Some(1)).unwrap();
        assert_eq!(result, Selection::Miss(MissReason::EmptySelection));
    }

    #[test]
    fn test_no_match() {
        let result = select(&json!("nothing here"), r"/\d+/", None).unwrap();
        assert_eq!(result, Selection::Miss(MissReason::NoMatch));
    }

    #[test]
    fn test_structured_candidate_is_serialized() {
        let data = json!({"token": "abc123"});
        let result = select(&data, r#"/"token":"(\w+)"/"#, Some(1)).unwrap();
        assert_eq!(result, Selection::Found("abc123".into()));
    }

    #[test]
    fn test_global_match_item() {
        let result = select(&json!("a1 b22 c333"), r"/\d+/g", Some(2)).unwrap();
        assert_eq!(result, Selection::Found("333".into()));
    }

    #[test]
    fn test_compile_error() {
        let err = select(&json!("x"), "/(x/", None).unwrap_err();
        assert!(matches!(err, ExtractError::Pattern(PatternError::Syntax(_))));
    }
}
