//! Pattern compiler.
//!
//! Compiles slash-delimited pattern literals such as `/(\d+)-(\w+)/gi` into a
//! [`CompiledPattern`]. A literal that starts with `/` is split at its last `/`
//! when everything after it is flag letters; any other literal is a bare
//! pattern body without flags.
//!
//! | Flag | Effect |
//! |------|--------|
//! | `i` | Case-insensitive |
//! | `m` | `^`/`$` match at line boundaries |
//! | `s` | `.` matches newlines |
//! | `x` | Free-spacing: whitespace ignored, `#` starts a comment |
//! | `n` | Explicit capture: only named groups capture |
//! | `g` | Global: a match returns every whole match |
//! | `y` | Sticky: matches must start at offset 0 and be contiguous |
//! | `u`, `A`, `d` | Accepted; Unicode and astral matching are always on |

use assay_core::{EngineLimits, PatternError};
use regex::{Regex, RegexBuilder};

/// Parsed pattern flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct PatternFlags {
    /// `i`
    pub case_insensitive: bool,
    /// `m`
    pub multi_line: bool,
    /// `s`
    pub dot_all: bool,
    /// `x`
    pub free_spacing: bool,
    /// `n`
    pub explicit_capture: bool,
    /// `g`
    pub global: bool,
    /// `y`
    pub sticky: bool,
    /// `u`
    pub unicode: bool,
    /// `A`
    pub astral: bool,
    /// `d`
    pub indices: bool,
}

impl PatternFlags {
    /// Parses a flag string, rejecting unknown and repeated letters.
    ///
    /// # Example
    ///
    /// ```
    /// use assay_extract::pattern::PatternFlags;
    ///
    /// let flags = PatternFlags::parse("gi").unwrap();
    /// assert!(flags.global && flags.case_insensitive);
    /// assert!(PatternFlags::parse("gg").is_err());
    /// ```
    pub fn parse(flags: &str) -> Result<Self, PatternError> {
        let mut parsed = Self::default();
        for flag in flags.chars() {
            let slot = match flag {
                'i' => &mut parsed.case_insensitive,
                'm' => &mut parsed.multi_line,
                's' => &mut parsed.dot_all,
                'x' => &mut parsed.free_spacing,
                'n' => &mut parsed.explicit_capture,
                'g' => &mut parsed.global,
                'y' => &mut parsed.sticky,
                'u' => &mut parsed.unicode,
                'A' => &mut parsed.astral,
                'd' => &mut parsed.indices,
                other => return Err(PatternError::UnknownFlag(other)),
            };
            if *slot {
                return Err(PatternError::DuplicateFlag(flag));
            }
            *slot = true;
        }
        Ok(parsed)
    }
}

/// A compiled pattern ready for matching.
///
/// # Example
///
/// ```
/// use assay_extract::pattern::CompiledPattern;
///
/// let pattern = CompiledPattern::compile(r"/(\d+)/").unwrap();
/// let groups = pattern.matches("order-7781").unwrap();
/// assert_eq!(groups[0].as_deref(), Some("7781"));
/// assert_eq!(groups[1].as_deref(), Some("7781"));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    flags: PatternFlags,
}

impl CompiledPattern {
    /// Compiles a pattern literal with default limits.
    pub fn compile(literal: &str) -> Result<Self, PatternError> {
        Self::compile_with(literal, &EngineLimits::default())
    }

    /// Compiles a pattern literal within the given limits.
    pub fn compile_with(literal: &str, limits: &EngineLimits) -> Result<Self, PatternError> {
        let (body, flags) = split_literal(literal);
        let flags = PatternFlags::parse(flags)?;

        if body.is_empty() {
            return Err(PatternError::Empty);
        }
        let length = body.chars().count();
        if length > limits.max_expression_length {
            return Err(PatternError::TooLong {
                length,
                limit: limits.max_expression_length,
            });
        }

        let source = if flags.explicit_capture || flags.free_spacing {
            rewrite_body(body, flags)
        } else {
            body.to_string()
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .ignore_whitespace(flags.free_spacing)
            .size_limit(limits.regex_size_limit)
            .nest_limit(limits.regex_nest_limit)
            .build()
            .map_err(|e| PatternError::Syntax(e.to_string()))?;

        Ok(Self { regex, flags })
    }

    /// Returns the parsed flags.
    #[must_use]
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Matches the pattern against `haystack`.
    ///
    /// Without `g`, returns `[whole, group1, ..]` where groups that did not
    /// participate are `None`. With `g`, returns every whole match. Returns
    /// `None` when nothing matched.
    #[must_use]
    pub fn matches(&self, haystack: &str) -> Option<Vec<Option<String>>> {
        if self.flags.global {
            let mut found = Vec::new();
            let mut expected_start = 0;
            for m in self.regex.find_iter(haystack) {
                if self.flags.sticky && m.start() != expected_start {
                    break;
                }
                expected_start = m.end();
                found.push(Some(m.as_str().to_string()));
            }
            return (!found.is_empty()).then_some(found);
        }

        let captures = self.regex.captures(haystack)?;
        // Leftmost match: if it does not start at 0, no match does.
        if self.flags.sticky && captures.get(0).map_or(true, |m| m.start() != 0) {
            return None;
        }
        Some(
            captures
                .iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect(),
        )
    }
}

/// Reports whether a pattern literal compiles with default limits.
///
/// # Example
///
/// ```
/// use assay_extract::is_valid_pattern;
///
/// assert!(is_valid_pattern(r"/^\w+$/i"));
/// assert!(!is_valid_pattern("/(unclosed/"));
/// ```
#[must_use]
pub fn is_valid_pattern(literal: &str) -> bool {
    CompiledPattern::compile(literal).is_ok()
}

/// Splits a literal into its body and flag letters.
fn split_literal(literal: &str) -> (&str, &str) {
    let Some(rest) = literal.strip_prefix('/') else {
        return (literal, "");
    };
    match rest.rfind('/') {
        Some(idx) if rest[idx + 1..].chars().all(|c| c.is_ascii_alphabetic()) => {
            (&rest[..idx], &rest[idx + 1..])
        }
        _ => (rest, ""),
    }
}

/// Rewrites the pattern body before it reaches the regex engine.
///
/// With `n`, unnamed groups `(` become non-capturing `(?:`. With `x`,
/// whitespace and `#` inside a character class are escaped so they stay
/// literal; free-spacing only applies outside classes.
fn rewrite_body(body: &str, flags: PatternFlags) -> String {
    let mut out = String::with_capacity(body.len() + 8);
    let mut chars = body.chars().peekable();
    let mut in_class = false;
    // A `]` right after `[` or `[^` is a literal.
    let mut class_start = false;

    while let Some(c) = chars.next() {
        let at_class_start = std::mem::take(&mut class_start);
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' if !in_class => {
                in_class = true;
                class_start = true;
                out.push(c);
            }
            '^' if at_class_start => {
                class_start = true;
                out.push(c);
            }
            ']' if in_class && !at_class_start => {
                in_class = false;
                out.push(c);
            }
            '#' if in_class && flags.free_spacing => out.push_str(r"\#"),
            c if in_class && flags.free_spacing && c.is_whitespace() => {
                out.push_str(&format!(r"\x{{{:X}}}", u32::from(c)));
            }
            '(' if !in_class && flags.explicit_capture && chars.peek() != Some(&'?') => {
                out.push_str("(?:");
            }
            _ => out.push(c),
        }
    }
    out
}
