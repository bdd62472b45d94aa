//! Exact-value passthrough.

use assay_core::{ExtractMethod, ExtractResult};

use super::{Selection, Strategy, StrategyInput};

/// Returns the located value itself, stringified.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactValueStrategy;

impl Strategy for ExactValueStrategy {
    fn method(&self) -> ExtractMethod {
        ExtractMethod::ExactValue
    }

    fn select(&self, input: StrategyInput<'_>) -> ExtractResult<Selection> {
        Ok(Selection::from_value(input.data))
    }
}
