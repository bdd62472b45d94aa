//! End-to-end behavior of `execute` over wire-shaped configs and exchanges.

use assay_core::fixtures::{catalog_exchange, order_exchange};
use assay_core::{ExchangeContext, ExtractLocation, ExtractMethod, ExtractionConfig};
use assay_extract::{execute, ExtractionResult};
use proptest::prelude::*;
use serde_json::{json, Value};

fn config(value: Value) -> ExtractionConfig {
    serde_json::from_value(value).unwrap()
}

fn context(value: Value) -> ExchangeContext {
    serde_json::from_value(value).unwrap()
}

fn clean(data: &str) -> ExtractionResult {
    ExtractionResult {
        data: data.to_string(),
        message: String::new(),
        error_message: String::new(),
    }
}

// =============================================================================
// Configuration errors
// =============================================================================

#[test]
fn missing_location_or_method_uses_default() {
    let ctx = order_exchange();
    let configs = [
        json!({ "method": "EXACT_VALUE", "defaultValue": "d" }),
        json!({ "location": "RESPONSE_BODY", "defaultValue": "d" }),
        json!({ "location": "", "method": "", "defaultValue": "d" }),
        json!({ "location": "SOMEWHERE_ELSE", "method": "EXACT_VALUE", "defaultValue": "d" }),
    ];

    for raw in configs {
        let result = execute(&config(raw.clone()), &ctx);
        assert_eq!(result.data, "d", "{raw}");
        assert!(result.is_error(), "{raw}");
        assert!(result.message.ends_with(", default value was used"), "{raw}");
    }
}

#[test]
fn missing_location_without_default() {
    let result = execute(&config(json!({ "method": "REGEX" })), &order_exchange());
    assert_eq!(result.data, "");
    assert_eq!(result.message, result.error_message);
    assert!(result.is_error());
}

#[test]
fn name_scoped_location_requires_parameter_name() {
    for location in ["FORM_PARAMETER", "PATH_PARAMETER", "QUERY_PARAMETER", "REQUEST_HEADER", "RESPONSE_HEADER"] {
        let raw = json!({ "location": location, "method": "EXACT_VALUE", "parameterName": "" });
        let result = execute(&config(raw), &order_exchange());
        assert!(result.is_error(), "{location}");
        assert!(result.error_message.contains("parameter name"), "{location}");
    }
}

#[test]
fn expression_required_for_non_exact_methods() {
    for method in [ExtractMethod::Regex, ExtractMethod::JsonPath, ExtractMethod::XPath] {
        let cfg = ExtractionConfig::builder()
            .location(ExtractLocation::ResponseBody)
            .method(method)
            .expression("")
            .default_value("d")
            .build();
        let result = execute(&cfg, &order_exchange());
        assert_eq!(result.data, "d");
        assert_eq!(result.error_message, format!("{method} expression is not configured"));
    }
}

// =============================================================================
// Context errors
// =============================================================================

#[test]
fn container_missing_and_key_missing_are_distinct() {
    let ctx = context(json!({ "query": { "id": "42" } }));

    let absent = execute(
        &config(json!({ "location": "FORM_PARAMETER", "parameterName": "id", "method": "EXACT_VALUE" })),
        &ctx,
    );
    let missing = execute(
        &config(json!({ "location": "QUERY_PARAMETER", "parameterName": "page", "method": "EXACT_VALUE" })),
        &ctx,
    );

    assert!(absent.is_error());
    assert!(missing.is_error());
    assert_ne!(absent.error_message, missing.error_message);
    assert_eq!(missing.error_message, "query parameter 'page' was not found");
}

#[test]
fn empty_container_counts_as_absent() {
    let ctx = context(json!({ "form": {} }));
    let result = execute(
        &config(json!({ "location": "FORM_PARAMETER", "parameterName": "a", "method": "EXACT_VALUE" })),
        &ctx,
    );
    assert_eq!(result.error_message, "no form parameter values were captured");
}

#[test]
fn missing_bodies_fail() {
    let ctx = ExchangeContext::default();
    for location in ["RESPONSE_BODY", "REQUEST_RAW_BODY"] {
        let raw = json!({ "location": location, "method": "EXACT_VALUE", "defaultValue": "none" });
        let result = execute(&config(raw), &ctx);
        assert_eq!(result.data, "none");
        assert!(result.is_error(), "{location}");
    }
}

// =============================================================================
// Exact value
// =============================================================================

#[test]
fn query_parameter_exact_value() {
    let ctx = context(json!({ "query": { "id": "42" } }));
    let raw = json!({ "location": "QUERY_PARAMETER", "parameterName": "id", "method": "EXACT_VALUE" });
    assert_eq!(execute(&config(raw), &ctx), clean("42"));
}

#[test]
fn header_lookup_is_case_insensitive() {
    let ctx = context(json!({ "responseHeader": { "content-type": "text/plain" } }));
    let raw = json!({ "location": "RESPONSE_HEADER", "parameterName": "Content-Type", "method": "EXACT_VALUE" });
    assert_eq!(execute(&config(raw), &ctx), clean("text/plain"));
}

#[test]
fn empty_candidate_is_a_clean_miss() {
    let ctx = order_exchange();
    let raw = json!({
        "location": "FORM_PARAMETER",
        "parameterName": "empty",
        "method": "REGEX",
        "expression": "/x/",
        "defaultValue": "d"
    });
    assert_eq!(execute(&config(raw), &ctx), clean("d"));

    for candidate in [json!(null), json!([]), json!({})] {
        let ctx = context(json!({ "query": { "v": candidate } }));
        let raw = json!({ "location": "QUERY_PARAMETER", "parameterName": "v", "method": "EXACT_VALUE" });
        assert_eq!(execute(&config(raw), &ctx), clean(""));
    }
}

#[test]
fn falsy_scalars_are_not_empty() {
    let ctx = context(json!({ "query": { "zero": 0, "no": false } }));
    for (name, expected) in [("zero", "0"), ("no", "false")] {
        let raw = json!({ "location": "QUERY_PARAMETER", "parameterName": name, "method": "EXACT_VALUE" });
        assert_eq!(execute(&config(raw), &ctx), clean(expected));
    }
}

#[test]
fn exact_value_serializes_structures() {
    let ctx = order_exchange();
    let raw = json!({ "location": "QUERY_PARAMETER", "parameterName": "tags", "method": "EXACT_VALUE" });
    assert_eq!(execute(&config(raw), &ctx), clean(r#"["a","b"]"#));
}

// =============================================================================
// Regex
// =============================================================================

#[test]
fn regex_whole_match_by_default() {
    let ctx = context(json!({ "path": { "orderId": "order-7781" } }));
    let raw = json!({
        "location": "PATH_PARAMETER",
        "parameterName": "orderId",
        "method": "REGEX",
        "expression": r"/(\d+)/"
    });
    assert_eq!(execute(&config(raw), &ctx), clean("7781"));
}

#[test]
fn regex_match_item_as_string() {
    let raw = json!({
        "location": "REQUEST_HEADER",
        "parameterName": "authorization",
        "method": "REGEX",
        "expression": r"/^(\w+) (.+)$/",
        "matchItem": "2"
    });
    assert_eq!(execute(&config(raw), &order_exchange()), clean("token-123"));
}

#[test]
fn regex_compile_error_uses_default() {
    let raw = json!({
        "location": "RESPONSE_BODY",
        "method": "REGEX",
        "expression": "/(\\d+/",
        "defaultValue": "N/A"
    });
    let result = execute(&config(raw), &order_exchange());
    assert_eq!(result.data, "N/A");
    assert_eq!(result.error_message, "regex error");
    assert_eq!(result.message, "regex error, default value was used");
}

#[test]
fn regex_no_match_is_not_an_error() {
    let raw = json!({
        "location": "QUERY_PARAMETER",
        "parameterName": "id",
        "method": "REGEX",
        "expression": "/[a-z]+/",
        "defaultValue": "0"
    });
    let result = execute(&config(raw), &order_exchange());
    assert_eq!(result.data, "0");
    assert_eq!(result.message, "extracted value empty, default value was used");
    assert!(!result.is_error());
}

#[test]
fn regex_runs_over_serialized_body() {
    let raw = json!({
        "location": "RESPONSE_BODY",
        "method": "REGEX",
        "expression": r#"/"status":"([A-Z]+)"/"#,
        "matchItem": 1
    });
    assert_eq!(execute(&config(raw), &order_exchange()), clean("SHIPPED"));
}

#[test]
fn regex_extended_flags() {
    let ctx = context(json!({ "rawBody": "Line one\nSECOND line" }));
    let cases = [
        (r"/^second (\w+)$/im", Some(1), "line"),
        ("/one.second/is", None, "one\nSECOND"),
        ("/ (?<word> one ) \\s+ (?<cap> [A-Z]+ ) /x", Some(2), "SECOND"),
        ("/ Line [ ] one /x", None, "Line one"),
        (r"/(\w+)\s(\w+)/n", Some(1), ""),
    ];
    for (expression, match_item, expected) in cases {
        let mut raw = json!({ "location": "REQUEST_RAW_BODY", "method": "REGEX", "expression": expression });
        if let Some(item) = match_item {
            raw["matchItem"] = json!(item);
        }
        let result = execute(&config(raw), &ctx);
        assert_eq!(result.data, expected, "{expression}");
        assert!(!result.is_error(), "{expression}");
    }
}

// =============================================================================
// JSONPath
// =============================================================================

#[test]
fn json_path_single_value_stringified() {
    let ctx = context(json!({ "responseBody": { "data": { "user": { "id": 9 } } } }));
    let raw = json!({ "location": "RESPONSE_BODY", "method": "JSON_PATH", "expression": "$.user.id" });
    assert_eq!(execute(&config(raw), &ctx), clean("9"));
}

#[test]
fn json_path_many_matches_without_item_returns_array() {
    let raw = json!({ "location": "RESPONSE_BODY", "method": "JSON_PATH", "expression": "$.order.items[*].sku" });
    assert_eq!(execute(&config(raw), &order_exchange()), clean(r#"["A-1","B-2","C-3"]"#));
}

#[test]
fn json_path_match_item_selects() {
    let raw = json!({
        "location": "RESPONSE_BODY",
        "method": "JSON_PATH",
        "expression": "$.order.items[*].qty",
        "matchItem": 1.0
    });
    assert_eq!(execute(&config(raw), &order_exchange()), clean("1"));
}

#[test]
fn json_path_over_raw_json_text() {
    let ctx = context(json!({ "rawBody": "{\"lookup\":\"order-7781\"}" }));
    let raw = json!({ "location": "REQUEST_RAW_BODY", "method": "JSON_PATH", "expression": "$.lookup" });
    assert_eq!(execute(&config(raw), &ctx), clean("order-7781"));
}

#[test]
fn json_path_errors_and_misses() {
    let ctx = order_exchange();

    let raw = json!({ "location": "RESPONSE_BODY", "method": "JSON_PATH", "expression": "user.id", "defaultValue": "d" });
    let result = execute(&config(raw), &ctx);
    assert_eq!(result.data, "d");
    assert_eq!(result.error_message, "jsonpath expression error");

    let raw = json!({ "location": "RESPONSE_BODY", "method": "JSON_PATH", "expression": "$.user.email", "defaultValue": "d" });
    let result = execute(&config(raw), &ctx);
    assert_eq!(result.data, "d");
    assert_eq!(result.message, "extracted value empty, default value was used");
    assert!(!result.is_error());
}

// =============================================================================
// XPath
// =============================================================================

#[test]
fn xpath_selects_text() {
    let raw = json!({
        "location": "RESPONSE_BODY",
        "method": "X_PATH",
        "expression": "/catalog/book[@lang='fr']/title"
    });
    assert_eq!(execute(&config(raw), &catalog_exchange()), clean("Maeve Ascendant"));
}

#[test]
fn xpath_many_matches_joined_or_selected() {
    let ctx = catalog_exchange();
    let raw = json!({ "location": "RESPONSE_BODY", "method": "X_PATH", "expression": "//book/price" });
    assert_eq!(execute(&config(raw), &ctx), clean("44.955.955.95"));

    let raw = json!({ "location": "RESPONSE_BODY", "method": "X_PATH", "expression": "//book/price", "matchItem": 0 });
    assert_eq!(execute(&config(raw), &ctx), clean("44.95"));
}

#[test]
fn xpath_over_raw_body() {
    let raw = json!({ "location": "REQUEST_RAW_BODY", "method": "X_PATH", "expression": "/query/lang" });
    assert_eq!(execute(&config(raw), &catalog_exchange()), clean("en"));
}

#[test]
fn xpath_on_json_body_is_an_error() {
    let raw = json!({ "location": "RESPONSE_BODY", "method": "X_PATH", "expression": "/order", "defaultValue": "d" });
    let result = execute(&config(raw), &order_exchange());
    assert_eq!(result.data, "d");
    assert_eq!(result.error_message, "xpath expression error");
}

const SOAP_ENVELOPE: &str = "<s:Envelope xmlns:s='http://schemas.xmlsoap.org/soap/envelope/'>\
<s:Body><id>7</id></s:Body></s:Envelope>";

#[test]
fn xpath_resolves_prefixes_declared_by_the_document() {
    let ctx = context(json!({ "rawBody": SOAP_ENVELOPE }));
    let raw = json!({ "location": "REQUEST_RAW_BODY", "method": "X_PATH", "expression": "//s:Body/id" });
    assert_eq!(execute(&config(raw), &ctx), clean("7"));

    let raw = json!({ "location": "REQUEST_RAW_BODY", "method": "X_PATH", "expression": "//*[local-name()='Body']/id" });
    assert_eq!(execute(&config(raw), &ctx), clean("7"));
}

#[test]
fn xpath_unbound_prefix_is_an_error() {
    let ctx = context(json!({ "rawBody": SOAP_ENVELOPE }));
    let raw = json!({ "location": "REQUEST_RAW_BODY", "method": "X_PATH", "expression": "//foo:*", "defaultValue": "d" });
    let result = execute(&config(raw), &ctx);
    assert_eq!(result.data, "d");
    assert_eq!(result.message, "xpath expression error, default value was used");
    assert_eq!(result.error_message, "xpath expression error");
}

#[test]
fn xpath_accepts_doctype() {
    let ctx = context(json!({ "rawBody": "<!DOCTYPE a><a><b>1</b></a>" }));
    let raw = json!({ "location": "REQUEST_RAW_BODY", "method": "X_PATH", "expression": "//b" });
    assert_eq!(execute(&config(raw), &ctx), clean("1"));
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn inputs_are_not_mutated() {
    let ctx = order_exchange();
    let before = ctx.clone();
    let cfg = config(json!({ "location": "RESPONSE_BODY", "method": "JSON_PATH", "expression": "$..sku" }));
    let cfg_before = cfg.clone();
    let _ = execute(&cfg, &ctx);
    assert_eq!(ctx, before);
    assert_eq!(cfg, cfg_before);
}

#[test]
fn concurrent_calls_agree() {
    let ctx = order_exchange();
    let cfg = config(json!({ "location": "RESPONSE_BODY", "method": "JSON_PATH", "expression": "$.user.name" }));
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| execute(&cfg, &ctx))).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), clean("Alice"));
        }
    });
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{1,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Value::from),
            prop::collection::btree_map("[a-z]{1,6}", inner, 1..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn execute_is_idempotent(candidate in arb_json(), expression in "/[a-z0-9]{1,3}/i?") {
        let ctx = ExchangeContext::builder().raw_body(candidate).build();
        let cfg = config(json!({
            "location": "REQUEST_RAW_BODY",
            "method": "REGEX",
            "expression": expression,
            "defaultValue": "d"
        }));
        prop_assert_eq!(execute(&cfg, &ctx), execute(&cfg, &ctx));
    }

    #[test]
    fn exact_value_round_trips_structures(candidate in arb_json()) {
        let ctx = ExchangeContext::builder().raw_body(candidate.clone()).build();
        let cfg = config(json!({ "location": "REQUEST_RAW_BODY", "method": "EXACT_VALUE" }));
        let result = execute(&cfg, &ctx);
        prop_assert!(!result.is_error());
        if !candidate.is_string() {
            let parsed: Value = serde_json::from_str(&result.data).unwrap();
            prop_assert_eq!(parsed, candidate);
        }
    }

    #[test]
    fn match_item_never_faults(item in prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".{0,6}".prop_map(Value::from),
    ]) {
        let cfg = config(json!({
            "location": "RESPONSE_BODY",
            "method": "JSON_PATH",
            "expression": "$.order.items[*].sku",
            "matchItem": item
        }));
        let result = execute(&cfg, &order_exchange());
        prop_assert!(!result.is_error());
    }
}
