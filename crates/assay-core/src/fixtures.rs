//! Test fixtures for Assay development and testing.
//!
//! Canned exchanges shared by unit tests, integration tests and doc
//! examples across the workspace.
//!
//! # Example
//!
//! ```
//! use assay_core::fixtures;
//!
//! let exchange = fixtures::order_exchange();
//! assert_eq!(exchange.status, Some(200));
//! assert_eq!(exchange.response_data()["order"]["id"], "order-7781");
//! ```

use serde_json::json;

use crate::exchange::ExchangeContext;

/// XML document served by [`catalog_exchange`].
pub const CATALOG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<catalog>
  <book id="bk101" lang="en">
    <title>XML Developer's Guide</title>
    <price>44.95</price>
  </book>
  <book id="bk102" lang="en">
    <title>Midnight Rain</title>
    <price>5.95</price>
  </book>
  <book id="bk103" lang="fr">
    <title>Maeve Ascendant</title>
    <price>5.95</price>
  </book>
</catalog>"#;

/// An order lookup: `GET /orders/{orderId}?id=42` answered with JSON.
///
/// - query: `id=42`, `tags=["a","b"]`
/// - path: `orderId=order-7781`
/// - form: `note=urgent`, `empty=""`
/// - request headers: `Authorization`, `X-Request-Id`
/// - response headers: `content-type`, `X-RateLimit-Remaining`
/// - response body: an order with three items and a user
#[must_use]
pub fn order_exchange() -> ExchangeContext {
    ExchangeContext::builder()
        .query("id", "42")
        .query("tags", json!(["a", "b"]))
        .path("orderId", "order-7781")
        .form("note", "urgent")
        .form("empty", "")
        .header("Authorization", "Bearer token-123")
        .header("X-Request-Id", "req-0001")
        .response_header("content-type", "application/json; charset=utf-8")
        .response_header("X-RateLimit-Remaining", "57")
        .response_body(json!({
            "order": {
                "id": "order-7781",
                "status": "SHIPPED",
                "items": [
                    { "sku": "A-1", "qty": 2, "price": 9.5 },
                    { "sku": "B-2", "qty": 1, "price": 20 },
                    { "sku": "C-3", "qty": 5, "price": 1.25 }
                ]
            },
            "user": { "id": 9, "name": "Alice" }
        }))
        .raw_body(json!({ "lookup": "order-7781" }))
        .status(200)
        .duration(18.0)
        .build()
}

/// A catalogue listing answered with XML (see [`CATALOG_XML`]).
#[must_use]
pub fn catalog_exchange() -> ExchangeContext {
    ExchangeContext::builder()
        .header("Accept", "application/xml")
        .response_header("Content-Type", "application/xml")
        .response_body(CATALOG_XML)
        .raw_body("<query><lang>en</lang></query>")
        .status(200)
        .duration(7.0)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractLocation;

    #[test]
    fn test_order_exchange() {
        let exchange = order_exchange();
        assert_eq!(exchange.container(ExtractLocation::QueryParameter).unwrap()["id"], "42");
        assert_eq!(exchange.response_data()["order"]["items"].as_array().unwrap().len(), 3);
        assert!(!exchange.raw_body.is_null());
    }

    #[test]
    fn test_catalog_exchange() {
        let exchange = catalog_exchange();
        assert!(exchange.response_data().as_str().unwrap().contains("<catalog>"));
        assert!(exchange.query.is_none());
    }
}
