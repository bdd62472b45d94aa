//! XPath strategy.

use std::borrow::Cow;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

use assay_core::value::stringify;
use assay_core::{EngineLimits, ExtractError, ExtractMethod, ExtractResult};
use sxd_document::dom::{ChildOfElement, ChildOfRoot, Document, Element};
use sxd_document::parser;
use sxd_xpath::{Context, Factory, Value as XPathValue};

use super::{check_expression_length, select_from_results, Selection, Strategy, StrategyInput};

/// Evaluates an XPath 1.0 expression over markup text.
///
/// Non-string candidates are serialized before parsing. Node-set results map
/// to each node's string-value in document order; string, number and boolean
/// results count as a single match. With several results and no
/// `matchItem`, the values are concatenated without a separator.
///
/// Namespace prefixes declared anywhere in the document are available to
/// the expression. When a prefix is declared twice with different URIs, the
/// first declaration in document order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct XPathStrategy {
    limits: EngineLimits,
}

impl XPathStrategy {
    /// Creates an XPath strategy with the given limits.
    #[must_use]
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    fn evaluate(&self, markup: &str, expression: &str) -> ExtractResult<Vec<String>> {
        if markup.len() > self.limits.max_document_bytes {
            return Err(ExtractError::xpath(format!(
                "document is {} bytes, limit is {}",
                markup.len(),
                self.limits.max_document_bytes
            )));
        }

        let package = parser::parse(&strip_doctype(markup))
            .map_err(|e| ExtractError::xpath(format!("malformed document: {e:?}")))?;
        let document = package.as_document();

        let xpath = Factory::new()
            .build(expression)
            .map_err(|e| ExtractError::xpath(e.to_string()))?
            .ok_or_else(|| ExtractError::xpath("expression compiled to nothing"))?;

        let mut context = Context::new();
        let bound = bind_namespaces(&document, &mut context);
        if let Some(prefix) = unbound_prefix(expression, &bound) {
            return Err(ExtractError::xpath(format!(
                "namespace prefix '{prefix}' is not declared"
            )));
        }

        // sxd-xpath panics on some inputs instead of returning an error.
        let value = panic::catch_unwind(AssertUnwindSafe(|| {
            xpath.evaluate(&context, document.root())
        }))
        .map_err(|_| ExtractError::xpath("evaluation aborted"))?
        .map_err(|e| ExtractError::xpath(e.to_string()))?;

        Ok(match value {
            XPathValue::Nodeset(nodes) => nodes
                .document_order()
                .into_iter()
                .map(|node| node.string_value())
                .collect(),
            XPathValue::String(text) => vec![text],
            XPathValue::Number(number) => vec![format_number(number)],
            XPathValue::Boolean(flag) => vec![flag.to_string()],
        })
    }
}

/// Registers every prefix declared in the document and returns the bound set.
fn bind_namespaces(document: &Document<'_>, context: &mut Context<'_>) -> HashSet<String> {
    let mut bound = HashSet::new();
    let mut pending: Vec<Element<'_>> = document
        .root()
        .children()
        .into_iter()
        .rev()
        .filter_map(|child| match child {
            ChildOfRoot::Element(element) => Some(element),
            _ => None,
        })
        .collect();

    while let Some(element) = pending.pop() {
        for namespace in element.namespaces_in_scope() {
            let prefix = namespace.prefix();
            if !prefix.is_empty() && bound.insert(prefix.to_string()) {
                context.set_namespace(prefix, namespace.uri());
            }
        }
        pending.extend(element.children().into_iter().rev().filter_map(|child| match child {
            ChildOfElement::Element(element) => Some(element),
            _ => None,
        }));
    }
    bound
}

/// Finds the first QName prefix in `expression` that is not in `bound`.
///
/// Axis names (`child::`) and string literals are skipped.
fn unbound_prefix<'e>(expression: &'e str, bound: &HashSet<String>) -> Option<&'e str> {
    let bytes = expression.as_bytes();
    let is_name_char =
        |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.') || b >= 0x80;
    let mut quote = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if is_name_char(b) && !b.is_ascii_digit() && b != b'-' && b != b'.' => {
                let start = i;
                while i < bytes.len() && is_name_char(bytes[i]) {
                    i += 1;
                }
                let is_prefix = bytes.get(i) == Some(&b':') && bytes.get(i + 1) != Some(&b':');
                let name = &expression[start..i];
                if is_prefix && !bound.contains(name) {
                    return Some(name);
                }
                continue;
            }
            None if b.is_ascii_digit() => {
                // Numbers like `1.5e`: consume so the tail is not read as a name.
                while i < bytes.len() && is_name_char(bytes[i]) {
                    i += 1;
                }
                continue;
            }
            None => {}
        }
        i += 1;
    }
    None
}

/// Removes a `<!DOCTYPE ..>` declaration from the prolog.
///
/// The parser rejects document type declarations. Entities declared in an
/// internal subset are dropped with it, so documents that use them still
/// fail to parse.
fn strip_doctype(markup: &str) -> Cow<'_, str> {
    let Some(start) = markup.find("<!DOCTYPE") else {
        return Cow::Borrowed(markup);
    };
    let in_prolog = !markup[..start]
        .match_indices('<')
        .any(|(i, _)| markup[i + 1..].starts_with(|c: char| c.is_alphabetic() || c == '_'));
    if !in_prolog {
        return Cow::Borrowed(markup);
    }

    let mut depth = 0usize;
    let mut quote = None;
    for (offset, c) in markup[start..].char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, '>') if depth == 0 => {
                let end = start + offset + 1;
                return Cow::Owned(format!("{}{}", &markup[..start], &markup[end..]));
            }
            _ => {}
        }
    }
    Cow::Borrowed(markup)
}

impl Strategy for XPathStrategy {
    fn method(&self) -> ExtractMethod {
        ExtractMethod::XPath
    }

    fn select(&self, input: StrategyInput<'_>) -> ExtractResult<Selection> {
        check_expression_length(self.method(), input.expression, &self.limits)?;

        let markup = stringify(input.data);
        let results = self.evaluate(&markup, input.expression)?;
        Ok(select_from_results(
            results,
            input.match_item,
            |text| Selection::from_text(Some(text)),
            |all| Selection::from_text(Some(all.concat())),
        ))
    }
}

/// Renders a number the way XPath `string()` does.
fn format_number(number: f64) -> String {
    if number.is_nan() {
        "NaN".to_string()
    } else if number.is_infinite() {
        if number.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if number == 0.0 {
        "0".to_string()
    } else {
        number.to_string()
    }
}
