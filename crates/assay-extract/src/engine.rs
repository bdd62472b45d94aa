//! The extraction orchestrator.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use assay_core::value::is_empty_value;
use assay_core::{
    EngineLimits, EnglishMessages, ExchangeContext, ExtractError, ExtractMethod, Extraction,
    ExtractionConfig, ExtractionResult, MessageFormatter, MissReason,
};
use assay_telemetry::metrics;
use tracing::{debug, debug_span, warn};

use crate::resolver::resolve;
use crate::strategy::{
    ExactValueStrategy, JsonPathStrategy, RegexStrategy, Selection, Strategy, StrategyInput,
    XPathStrategy,
};

/// Runs extractions.
///
/// An `Extractor` holds only immutable settings: resource limits and the
/// message formatter. It is cheap to share and safe to call from many
/// threads at once.
///
/// # Example
///
/// ```
/// use assay_core::{fixtures, ExtractLocation, ExtractMethod, ExtractionConfig};
/// use assay_extract::Extractor;
///
/// let extractor = Extractor::new();
/// let config = ExtractionConfig::builder()
///     .location(ExtractLocation::ResponseBody)
///     .method(ExtractMethod::JsonPath)
///     .expression("$.order.status")
///     .build();
///
/// let result = extractor.execute(&config, &fixtures::order_exchange());
/// assert_eq!(result.data, "SHIPPED");
/// assert!(result.message.is_empty());
/// assert!(!result.is_error());
/// ```
#[derive(Clone)]
pub struct Extractor {
    formatter: Arc<dyn MessageFormatter>,
    exact: ExactValueStrategy,
    regex: RegexStrategy,
    json_path: JsonPathStrategy,
    xpath: XPathStrategy,
}

impl Extractor {
    /// Creates an extractor with default limits and English messages.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder.
    #[must_use]
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::default()
    }

    /// Runs one extraction and renders it into the boundary triple.
    ///
    /// Never panics and never returns an error: every failure becomes an
    /// [`ExtractionResult`] carrying the default value.
    pub fn execute(&self, config: &ExtractionConfig, context: &ExchangeContext) -> ExtractionResult {
        self.evaluate(config, context)
            .into_result(self.formatter.as_ref())
    }

    /// Runs one extraction and returns the typed outcome.
    pub fn evaluate(&self, config: &ExtractionConfig, context: &ExchangeContext) -> Extraction {
        let method_label = config.method.map_or("NONE", |m| m.as_str());
        let span = debug_span!(
            "extract",
            location = config.location.map_or("NONE", |l| l.as_str()),
            method = method_label,
        );
        let _entered = span.enter();

        let started = Instant::now();
        let outcome = self.run(config, context);
        let elapsed = started.elapsed();

        match &outcome {
            Extraction::Extracted { .. } => {}
            Extraction::Miss { reason, .. } => {
                debug!(
                    miss_reason = ?reason,
                    default_used = config.has_default(),
                    "extraction produced no value"
                );
            }
            Extraction::Failed { error, .. } => {
                warn!(
                    error_code = error.error_code(),
                    error = %error,
                    default_used = config.has_default(),
                    "extraction failed"
                );
                metrics::record_extraction_error(error.error_code());
            }
        }
        metrics::record_extraction(method_label, outcome.outcome_label(), elapsed);

        outcome
    }

    fn run(&self, config: &ExtractionConfig, context: &ExchangeContext) -> Extraction {
        let default_value = config.default_value();

        let Some(location) = config.location else {
            return Extraction::failed(ExtractError::MissingLocation, default_value);
        };
        let Some(method) = config.method else {
            return Extraction::failed(ExtractError::MissingMethod, default_value);
        };

        let candidate = match resolve(location, config.parameter_name(), context) {
            Ok(candidate) => candidate,
            Err(error) => return Extraction::failed(error, default_value),
        };

        // An absent value is not necessarily a failed assertion.
        if is_empty_value(candidate) {
            return Extraction::miss(MissReason::EmptyCandidate, default_value);
        }

        let expression = if method.requires_expression() {
            match config.expression() {
                Some(expression) => expression,
                None => {
                    return Extraction::failed(
                        ExtractError::MissingExpression { method },
                        default_value,
                    )
                }
            }
        } else {
            ""
        };

        let input = StrategyInput {
            data: candidate,
            expression,
            match_item: config.match_item,
        };

        match self.strategy(method).select(input) {
            Ok(Selection::Found(value)) => Extraction::extracted(value),
            Ok(Selection::Miss(reason)) => Extraction::miss(reason, default_value),
            Err(error) => Extraction::failed(error, default_value),
        }
    }

    fn strategy(&self, method: ExtractMethod) -> &dyn Strategy {
        match method {
            ExtractMethod::ExactValue => &self.exact,
            ExtractMethod::Regex => &self.regex,
            ExtractMethod::JsonPath => &self.json_path,
            ExtractMethod::XPath => &self.xpath,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("regex", &self.regex)
            .field("json_path", &self.json_path)
            .field("xpath", &self.xpath)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Extractor`].
#[derive(Default)]
pub struct ExtractorBuilder {
    limits: EngineLimits,
    formatter: Option<Arc<dyn MessageFormatter>>,
}

impl ExtractorBuilder {
    /// Sets the resource limits.
    #[must_use]
    pub fn limits(mut self, limits: EngineLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the message formatter.
    #[must_use]
    pub fn formatter(mut self, formatter: impl MessageFormatter + 'static) -> Self {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Sets a shared message formatter.
    #[must_use]
    pub fn shared_formatter(mut self, formatter: Arc<dyn MessageFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Builds the extractor.
    #[must_use]
    pub fn build(self) -> Extractor {
        Extractor {
            formatter: self
                .formatter
                .unwrap_or_else(|| Arc::new(EnglishMessages)),
            exact: ExactValueStrategy,
            regex: RegexStrategy::new(self.limits),
            json_path: JsonPathStrategy::new(self.limits),
            xpath: XPathStrategy::new(self.limits),
        }
    }
}

impl fmt::Debug for ExtractorBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorBuilder")
            .field("limits", &self.limits)
            .field("custom_formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Runs one extraction with default limits and English messages.
///
/// # Example
///
/// ```
/// use assay_core::{fixtures, ExtractLocation, ExtractMethod, ExtractionConfig};
///
/// let config = ExtractionConfig::builder()
///     .location(ExtractLocation::QueryParameter)
///     .parameter_name("id")
///     .method(ExtractMethod::ExactValue)
///     .build();
///
/// let result = assay_extract::execute(&config, &fixtures::order_exchange());
/// assert_eq!(result.data, "42");
/// ```
pub fn execute(config: &ExtractionConfig, context: &ExchangeContext) -> ExtractionResult {
    static DEFAULT: OnceLock<Extractor> = OnceLock::new();
    DEFAULT.get_or_init(Extractor::new).execute(config, context)
}
