//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐     ┌──────────────┐     ┌──────────────┐            │
//! │  │    Brand     │◄────│   Category   │◄────│   Product    │            │
//! │  │ ──────────── │     │ ──────────── │     │ ──────────── │            │
//! │  │ id (UUID)    │     │ id (UUID)    │     │ id (UUID)    │            │
//! │  │ name         │     │ brand_id (FK)│     │ brand_id     │            │
//! │  └──────────────┘     └──────────────┘     │ category_id  │            │
//! │                                            │ price_cents  │            │
//! │  ┌──────────────┐     ┌──────────────┐     │ stock        │            │
//! │  │    Order     │────►│  OrderItem   │     └──────────────┘            │
//! │  │ ──────────── │     │ ──────────── │                                 │
//! │  │ id (UUID)    │     │ product_id   │  OrderItem carries NAME         │
//! │  │ shopkeeper   │     │ *_name       │  SNAPSHOTS, never re-joined     │
//! │  │ status       │     │ quantity     │  to the live catalog            │
//! │  └──────────────┘     └──────────────┘                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cascade Rules
//! Deleting a brand removes its categories and products; deleting a
//! category removes its products. Order items are snapshots and survive
//! every catalog deletion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Brand
// =============================================================================

/// A distributor brand (e.g., a beverage or FMCG company).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name. Not required to be unique.
    pub name: String,

    /// When the brand was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A product category belonging to exactly one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Owning brand. Deleting the brand deletes this category.
    pub brand_id: String,

    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product held in the warehouse.
///
/// `stock` is the TOTAL on-hand quantity, independent of reservations.
/// Available stock is derived in [`crate::reservation`] by subtracting
/// quantities reserved by outstanding orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Owning brand.
    pub brand_id: String,

    /// Owning category.
    pub category_id: String,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Total on-hand quantity. Invariant: `stock >= 0` at all times;
    /// deduction clamps at zero rather than going negative.
    pub stock: i64,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Optional product image URL.
    pub image_url: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// Input fields for creating a product.
///
/// Ids and timestamps are assigned by the service, so callers only
/// provide the business fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub brand_id: String,
    pub category_id: String,
    pub price_cents: i64,
    pub stock: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Partial update for a product. `None` means "leave unchanged".
///
/// Present fields go through the same validation as [`NewProduct`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub brand_id: Option<String>,
    pub category_id: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl ProductPatch {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.brand_id.is_none()
            && self.category_id.is_none()
            && self.price_cents.is_none()
            && self.stock.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of a shopkeeper order.
///
/// Transitions are forward-only: `Pending → Packed → Delivered`. The
/// policy lives in [`crate::lifecycle`]; this enum is just the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order taken, not yet packed. Reserves stock.
    Pending,
    /// Order packed and awaiting delivery. Still reserves stock.
    Packed,
    /// Order delivered; stock has been physically deducted. Terminal.
    Delivered,
}

impl OrderStatus {
    /// Stable lowercase name, matching the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Packed => "packed",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A shopkeeper order.
///
/// Items are immutable once the order is created; composition happens
/// in an [`crate::draft::OrderDraft`] before the order exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Name of the shopkeeper the order was taken for.
    pub shopkeeper_name: String,

    /// Line items, frozen at creation time.
    pub items: Vec<OrderItem>,

    /// When the order was taken.
    pub created_at: DateTime<Utc>,

    /// Current lifecycle status.
    pub status: OrderStatus,
}

impl Order {
    /// Total quantity across all line items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Quantity of a given product in this order (0 if absent).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .sum()
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
///
/// Uses the snapshot pattern: product, brand, and category names are
/// frozen at order-creation time. Historical orders must show the names
/// as they were, so these fields are deliberately never revalidated
/// against the live catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product id at time of ordering. The product may no longer exist.
    pub product_id: String,

    /// Product name at time of ordering (frozen).
    pub product_name: String,

    /// Brand id at time of ordering.
    pub brand_id: String,

    /// Brand name at time of ordering (frozen).
    pub brand_name: String,

    /// Category id at time of ordering.
    pub category_id: String,

    /// Category name at time of ordering (frozen).
    pub category_name: String,

    /// Quantity ordered. Always positive.
    pub quantity: i64,
}

impl OrderItem {
    /// Builds a snapshot line item from a live product.
    ///
    /// Brand and category names are passed in by the caller, which is
    /// where the "Unknown" display fallback belongs.
    pub fn from_product(
        product: &Product,
        brand_name: impl Into<String>,
        category_name: impl Into<String>,
        quantity: i64,
    ) -> Self {
        OrderItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            brand_id: product.brand_id.clone(),
            brand_name: brand_name.into(),
            category_id: product.category_id.clone(),
            category_name: category_name.into(),
            quantity,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_order_status_display() {
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
        assert_eq!(OrderStatus::Packed.to_string(), "packed");
        assert_eq!(OrderStatus::Delivered.to_string(), "delivered");
    }

    #[test]
    fn test_order_status_serde_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Packed).unwrap();
        assert_eq!(json, "\"packed\"");

        let status: OrderStatus = serde_json::from_str("\"delivered\"").unwrap();
        assert_eq!(status, OrderStatus::Delivered);
    }

    #[test]
    fn test_product_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());

        let patch = ProductPatch {
            stock: Some(3),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_order_quantity_of() {
        let order = Order {
            id: "o1".to_string(),
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
                    product_name: "Chips".to_string(),
                    brand_id: "b1".to_string(),
                    brand_name: "Fizz Co".to_string(),
                    category_id: "c2".to_string(),
                    category_name: "Snacks".to_string(),
                    quantity: 2,
                },
            ],
            created_at: chrono::Utc::now(),
            status: OrderStatus::Pending,
        };

        assert_eq!(order.quantity_of("p1"), 4);
        assert_eq!(order.quantity_of("p2"), 2);
        assert_eq!(order.quantity_of("p3"), 0);
        assert_eq!(order.total_quantity(), 6);
    }
}
