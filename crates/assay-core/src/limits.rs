//! Resource budgets for untrusted expressions.

/// Limits applied while compiling patterns and evaluating path queries.
///
/// The regex engine guarantees linear-time matching, so the budgets bound
/// the compiled program and input sizes rather than wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineLimits {
    /// Upper bound on a compiled regex program, in bytes.
    pub regex_size_limit: usize,
    /// Maximum nesting depth of a regex pattern.
    pub regex_nest_limit: u32,
    /// Maximum length of a pattern or path expression, in characters.
    pub max_expression_length: usize,
    /// Maximum size of a markup document handed to XPath, in bytes.
    pub max_document_bytes: usize,
}

impl EngineLimits {
    /// Default compiled regex size limit (10 MiB).
    pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);
    /// Default regex nesting limit.
    pub const DEFAULT_REGEX_NEST_LIMIT: u32 = 250;
    /// Default maximum expression length.
    pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 4096;
    /// Default maximum XPath document size (16 MiB).
    pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 16 * (1 << 20);
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            regex_size_limit: Self::DEFAULT_REGEX_SIZE_LIMIT,
            regex_nest_limit: Self::DEFAULT_REGEX_NEST_LIMIT,
            max_expression_length: Self::DEFAULT_MAX_EXPRESSION_LENGTH,
            max_document_bytes: Self::DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}
