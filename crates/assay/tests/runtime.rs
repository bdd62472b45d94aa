//! Configuration-driven runtime tests for the facade crate.

use std::fs;

use assay::config::{AssayConfig, ConfigLoader};
use assay::core::fixtures::order_exchange;
use assay::prelude::*;

fn status_config() -> ExtractionConfig {
    ExtractionConfig::builder()
        .location(ExtractLocation::ResponseBody)
        .method(ExtractMethod::JsonPath)
        .expression("$.order.status")
        .default_value("fallback")
        .build()
}

#[test]
fn default_configuration_extracts() {
    let extractor = assay::extractor(&AssayConfig::default());
    let result = extractor.execute(&status_config(), &order_exchange());

    assert_eq!(result.data, "SHIPPED");
    assert!(!result.is_error());
}

#[test]
fn limits_from_file_are_enforced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("assay.toml");
    fs::write(&path, "[engine]\nmax_expression_length = 8\n").unwrap();

    let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();
    let result = assay::extractor(&config).execute(&status_config(), &order_exchange());

    assert_eq!(result.data, "fallback");
    assert_eq!(result.message, "jsonpath expression error, default value was used");
    assert_eq!(result.error_message, "jsonpath expression error");
}

#[test]
fn wire_config_through_facade() {
    let config: ExtractionConfig = serde_json::from_value(serde_json::json!({
        "location": "REQUEST_HEADER",
        "parameterName": "Authorization",
        "method": "REGEX",
        "expression": "/Bearer (\\S+)/",
        "matchItem": "1"
    }))
    .unwrap();

    let result = assay::execute(&config, &order_exchange());
    assert_eq!(result.data, "token-123");
}

#[test]
fn init_rejects_invalid_configuration() {
    let mut config = AssayConfig::default();
    config.engine.max_document_bytes = 0;

    let err = assay::init(&config).unwrap_err();
    assert!(matches!(err, assay::Error::Config(_)));
}
