//! # Stock Reservation Engine
//!
//! Derives, for any product, the quantity "reserved" by outstanding
//! orders and the quantity actually available to promise.
//!
//! ## The Three Numbers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  total / reserved / available                           │
//! │                                                                         │
//! │  Product.stock = 10          (physical units on the shelf)             │
//! │                                                                         │
//! │  Order A (pending)  4 ┐                                                │
//! │  Order B (packed)   3 ├──► reserved = 7   (pending + packed only)      │
//! │  Order C (delivered)2 ┘         ▲                                       │
//! │         ▲                       │ delivered orders contribute ZERO:     │
//! │         └───────────────────────┘ their units already left the shelf   │
//! │                                                                         │
//! │  available = max(0, total - reserved) = 3                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No Cache, Ever
//! Everything here is recomputed from the orders passed in. Stale
//! reservation data directly causes overselling, so there is nothing to
//! invalidate: callers hand in current state, we derive.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Order, Product};
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Reserved Quantities
// =============================================================================

/// Sums reserved quantities per product across all outstanding orders.
///
/// An order reserves stock while its status is `pending` or `packed`.
/// Delivered orders contribute nothing: their stock has already been
/// physically deducted and removed from the pool.
pub fn reserved_quantities(orders: &[Order]) -> HashMap<String, i64> {
    let mut reserved: HashMap<String, i64> = HashMap::new();

    for order in orders {
        if !order.status.reserves_stock() {
            continue;
        }
        for item in &order.items {
            *reserved.entry(item.product_id.clone()).or_insert(0) += item.quantity;
        }
    }

    reserved
}

/// Reserved quantity for a single product (0 if nothing outstanding).
pub fn reserved_for(orders: &[Order], product_id: &str) -> i64 {
    orders
        .iter()
        .filter(|o| o.status.reserves_stock())
        .map(|o| o.quantity_of(product_id))
        .sum()
}

// =============================================================================
// Availability
// =============================================================================

/// The total/reserved/available triple for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Physical on-hand stock, independent of reservations.
    pub total: i64,
    /// Quantity promised to pending/packed orders.
    pub reserved: i64,
    /// `max(0, total - reserved)` - what a new order may claim.
    pub available: i64,
}

/// Computes the availability triple for a product against current orders.
pub fn availability(product: &Product, orders: &[Order]) -> Availability {
    let reserved = reserved_for(orders, &product.id);
    Availability {
        total: product.stock,
        reserved,
        available: (product.stock - reserved).max(0),
    }
}

// =============================================================================
// Stock Health Report
// =============================================================================

/// Per-product stock classification for the analysis view.
///
/// Classification is for reporting, not enforcement: the draft layer is
/// what actually rejects over-reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockHealth {
    pub product: Product,
    pub total: i64,
    pub reserved: i64,
    pub available: i64,
    /// `available == 0`
    pub is_out_of_stock: bool,
    /// `0 < available <= LOW_STOCK_THRESHOLD`
    pub is_low_stock: bool,
}

impl StockHealth {
    /// Sort tier: out-of-stock (0) before low-stock (1) before healthy (2).
    fn tier(&self) -> u8 {
        if self.is_out_of_stock {
            0
        } else if self.is_low_stock {
            1
        } else {
            2
        }
    }
}

/// Classifies every product and sorts the report for display.
///
/// ## Sort Order
/// Out-of-stock first, then low-stock, then ascending by available
/// quantity. The sort is stable, so ties keep the original product
/// order.
pub fn analyze_stock(products: &[Product], orders: &[Order]) -> Vec<StockHealth> {
    let reserved = reserved_quantities(orders);

    let mut report: Vec<StockHealth> = products
        .iter()
        .map(|product| {
            let reserved = reserved.get(&product.id).copied().unwrap_or(0);
            let available = (product.stock - reserved).max(0);
            StockHealth {
                total: product.stock,
                reserved,
                available,
                is_out_of_stock: available == 0,
                is_low_stock: available > 0 && available <= LOW_STOCK_THRESHOLD,
                product: product.clone(),
            }
        })
        .collect();

    // Vec::sort_by_key is stable: equal keys preserve input order.
    report.sort_by_key(|entry| (entry.tier(), entry.available));

    report
}

/// Headline counts for the stock analysis view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub healthy: usize,
}

/// Counts report entries by classification.
pub fn summarize(report: &[StockHealth]) -> StockSummary {
    StockSummary {
        out_of_stock: report.iter().filter(|e| e.is_out_of_stock).count(),
        low_stock: report.iter().filter(|e| e.is_low_stock).count(),
        healthy: report
            .iter()
            .filter(|e| !e.is_out_of_stock && !e.is_low_stock)
            .count(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OrderItem, OrderStatus};
    use chrono::Utc;

    fn product(id: &str, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            brand_id: "b1".to_string(),
            category_id: "c1".to_string(),
            price_cents: 500,
            stock,
            description: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    fn order(id: &str, status: OrderStatus, lines: &[(&str, i64)]) -> Order {
        Order {
            id: id.to_string(),
            shopkeeper_name: "Ali General Store".to_string(),
            items: lines
                .iter()
                .map(|(pid, qty)| OrderItem {
                    product_id: pid.to_string(),
                    product_name: format!("Product {}", pid),
                    brand_id: "b1".to_string(),
                    brand_name: "Fizz Co".to_string(),
                    category_id: "c1".to_string(),
                    category_name: "Beverages".to_string(),
                    quantity: *qty,
                })
                .collect(),
            created_at: Utc::now(),
            status,
        }
    }

    #[test]
    fn test_reserved_counts_pending_and_packed_only() {
        let orders = vec![
            order("a", OrderStatus::Pending, &[("p1", 4)]),
            order("b", OrderStatus::Packed, &[("p1", 3)]),
            order("c", OrderStatus::Delivered, &[("p1", 2)]),
        ];

        assert_eq!(reserved_for(&orders, "p1"), 7);
        assert_eq!(reserved_for(&orders, "p2"), 0);

        let map = reserved_quantities(&orders);
        assert_eq!(map.get("p1"), Some(&7));
    }

    #[test]
    fn test_availability_exact_formula() {
        let p = product("p1", 10);
        let orders = vec![
            order("a", OrderStatus::Pending, &[("p1", 4)]),
            order("b", OrderStatus::Pending, &[("p1", 3)]),
        ];

        let avail = availability(&p, &orders);
        assert_eq!(avail.total, 10);
        assert_eq!(avail.reserved, 7);
        assert_eq!(avail.available, 3);
    }

    #[test]
    fn test_availability_clamps_at_zero() {
        // Over-reservation can arise when stock is manually lowered after
        // orders were taken; available must clamp, never go negative.
        let p = product("p1", 2);
        let orders = vec![order("a", OrderStatus::Packed, &[("p1", 5)])];

        let avail = availability(&p, &orders);
        assert_eq!(avail.reserved, 5);
        assert_eq!(avail.available, 0);
    }

    #[test]
    fn test_delivered_order_releases_reservation() {
        let p = product("p1", 6);
        let mut orders = vec![
            order("a", OrderStatus::Pending, &[("p1", 4)]),
            order("b", OrderStatus::Pending, &[("p1", 3)]),
        ];

        // Deliver order A: its reservation disappears from the pool.
        orders[0].status = OrderStatus::Delivered;
        let avail = availability(&p, &orders);
        assert_eq!(avail.reserved, 3);
        assert_eq!(avail.available, 3);
    }

    #[test]
    fn test_analyze_stock_classification() {
        let products = vec![product("p1", 10), product("p2", 4), product("p3", 0)];
        let orders = vec![order("a", OrderStatus::Pending, &[("p1", 10)])];

        let report = analyze_stock(&products, &orders);

        // p1: available 0 (fully reserved) - out of stock
        // p3: available 0 (no stock)       - out of stock
        // p2: available 4                  - low stock
        assert_eq!(report.len(), 3);
        assert!(report[0].is_out_of_stock);
        assert!(report[1].is_out_of_stock);
        assert!(report[2].is_low_stock);
        assert!(!report[2].is_out_of_stock);
    }

    #[test]
    fn test_analyze_stock_sort_is_three_tier_and_stable() {
        let products = vec![
            product("healthy-b", 50),
            product("low-a", 3),
            product("out-a", 0),
            product("healthy-a", 20),
            product("low-b", 3),
            product("out-b", 0),
        ];

        let report = analyze_stock(&products, &[]);
        let ids: Vec<&str> = report.iter().map(|e| e.product.id.as_str()).collect();

        // Ties (out-a/out-b at 0, low-a/low-b at 3) keep input order;
        // healthy tier sorts ascending by available.
        assert_eq!(
            ids,
            vec!["out-a", "out-b", "low-a", "low-b", "healthy-a", "healthy-b"]
        );
    }

    #[test]
    fn test_summarize() {
        let products = vec![product("p1", 0), product("p2", 2), product("p3", 40)];
        let report = analyze_stock(&products, &[]);
        let summary = summarize(&report);

        assert_eq!(summary.out_of_stock, 1);
        assert_eq!(summary.low_stock, 1);
        assert_eq!(summary.healthy, 1);
    }
}
