//! # Order Interchange Encodings
//!
//! Two textual encodings for bulk order exchange:
//!
//! - **JSON dump** - the orders serialized directly (camelCase fields).
//!   This is the round-trippable format: it can be re-imported.
//! - **CSV table** - flattened to one row per order item for
//!   spreadsheets. Export-only.
//!
//! ## CSV Layout
//! ```text
//! Order ID,Shopkeeper,Product,Brand,Category,Quantity,Status,Date
//! 5c0f...,Ali General Store,Cola 330ml,Fizz Co,Beverages,4,pending,2026-08-27
//! 5c0f...,Ali General Store,Chips,Fizz Co,Snacks,2,pending,2026-08-27
//! ```
//!
//! Import parses the JSON dump only. Assigning fresh ids to imported
//! orders is the service's job; this module just encodes and decodes.

use thiserror::Error;

use crate::types::Order;

/// CSV column headers for the flattened export.
const CSV_HEADERS: [&str; 8] = [
    "Order ID",
    "Shopkeeper",
    "Product",
    "Brand",
    "Category",
    "Quantity",
    "Status",
    "Date",
];

// =============================================================================
// Errors
// =============================================================================

/// Interchange encoding/decoding failures.
#[derive(Debug, Error)]
pub enum TransferError {
    /// JSON (de)serialization failed - malformed import data, mostly.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing failed.
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    /// The in-memory CSV buffer could not be finalized.
    #[error("CSV buffer error: {0}")]
    CsvBuffer(String),
}

/// Result type for interchange operations.
pub type TransferResult<T> = Result<T, TransferError>;

// =============================================================================
// JSON Dump
// =============================================================================

/// Serializes orders to the structured JSON dump (pretty-printed).
pub fn orders_to_json(orders: &[Order]) -> TransferResult<String> {
    Ok(serde_json::to_string_pretty(orders)?)
}

/// Parses a JSON dump back into orders.
///
/// The parsed orders still carry their exported ids; the service
/// replaces them with fresh ones on import.
pub fn orders_from_json(data: &str) -> TransferResult<Vec<Order>> {
    Ok(serde_json::from_str(data)?)
}

// =============================================================================
// CSV Table
// =============================================================================

/// Serializes orders to the flattened CSV table, one row per item.
pub fn orders_to_csv(orders: &[Order]) -> TransferResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADERS)?;

    for order in orders {
        let date = order.created_at.format("%Y-%m-%d").to_string();
        for item in &order.items {
            wtr.write_record([
                order.id.as_str(),
                order.shopkeeper_name.as_str(),
                item.product_name.as_str(),
                item.brand_name.as_str(),
                item.category_name.as_str(),
                item.quantity.to_string().as_str(),
                order.status.as_str(),
                date.as_str(),
            ])?;
        }
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| TransferError::CsvBuffer(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TransferError::CsvBuffer(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderItem, OrderStatus};
    use chrono::{TimeZone, Utc};

    fn sample_orders() -> Vec<Order> {
        vec![Order {
            id: "order-1".to_string(),
            shopkeeper_name: "Ali General Store".to_string(),
            items: vec![
                OrderItem {
                    product_id: "p1".to_string(),
                    product_name: "Cola 330ml".to_string(),
                    brand_id: "b1".to_string(),
                    brand_name: "Fizz Co".to_string(),
                    category_id: "c1".to_string(),
                    category_name: "Beverages".to_string(),
                    quantity: 4,
                },
                OrderItem {
                    product_id: "p2".to_string(),
                    product_name: "Salted Chips".to_string(),
                    brand_id: "b2".to_string(),
                    brand_name: "Crunch Ltd".to_string(),
                    category_id: "c2".to_string(),
                    category_name: "Snacks".to_string(),
                    quantity: 2,
                },
            ],
            created_at: Utc.with_ymd_and_hms(2026, 8, 27, 10, 30, 0).unwrap(),
            status: OrderStatus::Pending,
        }]
    }

    #[test]
    fn test_json_round_trip_preserves_content() {
        let orders = sample_orders();
        let json = orders_to_json(&orders).unwrap();
        let parsed = orders_from_json(&json).unwrap();

        assert_eq!(parsed, orders);
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let json = orders_to_json(&sample_orders()).unwrap();

        assert!(json.contains("\"shopkeeperName\""));
        assert!(json.contains("\"productName\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("\"shopkeeper_name\""));
    }

    #[test]
    fn test_csv_one_row_per_item() {
        let csv = orders_to_csv(&sample_orders()).unwrap();
        let lines: Vec<&str> = csv.trim_end().lines().collect();

        // Header + two item rows.
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Order ID,Shopkeeper,Product,Brand,Category,Quantity,Status,Date"
        );
        assert_eq!(
            lines[1],
            "order-1,Ali General Store,Cola 330ml,Fizz Co,Beverages,4,pending,2026-08-27"
        );
        assert!(lines[2].contains("Salted Chips"));
        assert!(lines[2].contains(",2,pending,"));
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let mut orders = sample_orders();
        orders[0].shopkeeper_name = "Mir Stores, Karachi".to_string();

        let csv = orders_to_csv(&orders).unwrap();
        assert!(csv.contains("\"Mir Stores, Karachi\""));
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(orders_from_json("not json at all").is_err());
        assert!(orders_from_json("{\"id\": 1}").is_err());
    }
}
