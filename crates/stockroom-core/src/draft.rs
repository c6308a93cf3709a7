//! # Order Draft
//!
//! Composes an order before it exists, validating every added line
//! against availability.
//!
//! ## Why a Draft?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Composition Flow                               │
//! │                                                                         │
//! │  Staff Action              Draft Operation        Validation            │
//! │  ────────────              ───────────────        ──────────            │
//! │                                                                         │
//! │  Pick product, qty ──────► add_item() ──────────► requested must fit    │
//! │                                                   available MINUS what  │
//! │                                                   this draft already    │
//! │                                                   staged for the product│
//! │                                                                         │
//! │  Remove a line ──────────► remove_item()                                │
//! │                                                                         │
//! │  Save order ─────────────► into_items() ────────► service.place_order() │
//! │                                                                         │
//! │  Items are snapshots: once the order is placed they are immutable.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft-local subtraction is what prevents a single draft from
//! double-reserving: two adds of 3 against an availability of 5 must
//! fail on the second add, even though each alone would fit.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::reservation::availability;
use crate::types::{Order, OrderItem, Product};
use crate::validation::validate_quantity;
use crate::MAX_DRAFT_ITEMS;

/// An uncommitted order under composition.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product
///   accumulates quantity)
/// - Every accepted line fits within availability at the time it was
///   added
/// - A rejected add leaves the draft untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    /// Lines staged so far.
    items: Vec<OrderItem>,
}

impl OrderDraft {
    /// Creates a new empty draft.
    pub fn new() -> Self {
        OrderDraft { items: Vec::new() }
    }

    /// Stages a line for `quantity` units of `product`.
    ///
    /// `orders` is the current order list; availability is recomputed
    /// from it on every call. Brand and category names are snapshotted
    /// as given (the caller resolves them, including any "Unknown"
    /// fallback for dangling references).
    ///
    /// ## Validation
    /// Let `remaining = available(product) - already_in_this_draft`.
    /// The add is rejected with [`CoreError::InsufficientStock`] when
    /// `quantity > remaining`, and the draft is not mutated.
    pub fn add_item(
        &mut self,
        product: &Product,
        brand_name: &str,
        category_name: &str,
        quantity: i64,
        orders: &[Order],
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let available = availability(product, orders).available;
        let in_draft = self.quantity_of(&product.id);
        let remaining = (available - in_draft).max(0);

        if quantity > remaining {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                requested: quantity,
                remaining,
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity += quantity;
            return Ok(());
        }

        if self.items.len() >= MAX_DRAFT_ITEMS {
            return Err(CoreError::DraftTooLarge {
                max: MAX_DRAFT_ITEMS,
            });
        }

        self.items.push(OrderItem::from_product(
            product,
            brand_name,
            category_name,
            quantity,
        ));
        Ok(())
    }

    /// Removes the line for a product. Returns false if absent.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Quantity already staged for a product (0 if absent).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.items
            .iter()
            .filter(|i| i.product_id == product_id)
            .map(|i| i.quantity)
            .sum()
    }

    /// Discards all staged lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct products staged.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read access to the staged lines.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Consumes the draft, yielding the lines for order placement.
    pub fn into_items(self) -> Vec<OrderItem> {
        self.items
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;
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

    fn pending_order(id: &str, product_id: &str, quantity: i64) -> Order {
        Order {
            id: id.to_string(),
            shopkeeper_name: "Ali General Store".to_string(),
            items: vec![OrderItem {
                product_id: product_id.to_string(),
                product_name: format!("Product {}", product_id),
                brand_id: "b1".to_string(),
                brand_name: "Fizz Co".to_string(),
                category_id: "c1".to_string(),
                category_name: "Beverages".to_string(),
                quantity,
            }],
            created_at: Utc::now(),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn test_add_item_snapshots_names() {
        let mut draft = OrderDraft::new();
        let p = product("p1", 10);

        draft.add_item(&p, "Fizz Co", "Beverages", 2, &[]).unwrap();

        assert_eq!(draft.item_count(), 1);
        let item = &draft.items()[0];
        assert_eq!(item.brand_name, "Fizz Co");
        assert_eq!(item.category_name, "Beverages");
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_add_same_product_accumulates() {
        let mut draft = OrderDraft::new();
        let p = product("p1", 10);

        draft.add_item(&p, "Fizz Co", "Beverages", 2, &[]).unwrap();
        draft.add_item(&p, "Fizz Co", "Beverages", 3, &[]).unwrap();

        assert_eq!(draft.item_count(), 1);
        assert_eq!(draft.quantity_of("p1"), 5);
    }

    #[test]
    fn test_boundary_exact_remaining_ok_one_more_rejected() {
        let p = product("p1", 10);
        let orders = vec![pending_order("a", "p1", 7)];

        // available = 3: exactly 3 fits...
        let mut draft = OrderDraft::new();
        draft
            .add_item(&p, "Fizz Co", "Beverages", 3, &orders)
            .unwrap();

        // ...but 4 against a fresh draft does not.
        let mut draft = OrderDraft::new();
        let err = draft
            .add_item(&p, "Fizz Co", "Beverages", 4, &orders)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                requested: 4,
                remaining: 3,
                ..
            }
        ));
        assert_eq!(err.shortfall(), 1);
        assert!(draft.is_empty());
    }

    #[test]
    fn test_draft_local_quantities_count_against_availability() {
        let p = product("p1", 5);
        let mut draft = OrderDraft::new();

        draft.add_item(&p, "Fizz Co", "Beverages", 3, &[]).unwrap();

        // 3 already staged leaves room for only 2 more.
        let err = draft
            .add_item(&p, "Fizz Co", "Beverages", 3, &[])
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { remaining: 2, .. }
        ));

        // Rejection did not change the staged quantity.
        assert_eq!(draft.quantity_of("p1"), 3);

        draft.add_item(&p, "Fizz Co", "Beverages", 2, &[]).unwrap();
        assert_eq!(draft.quantity_of("p1"), 5);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut draft = OrderDraft::new();
        let p1 = product("p1", 10);
        let p2 = product("p2", 10);

        draft.add_item(&p1, "Fizz Co", "Beverages", 1, &[]).unwrap();
        draft.add_item(&p2, "Fizz Co", "Snacks", 2, &[]).unwrap();

        assert!(draft.remove_item("p1"));
        assert!(!draft.remove_item("p1"));
        assert_eq!(draft.item_count(), 1);

        draft.clear();
        assert!(draft.is_empty());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut draft = OrderDraft::new();
        let p = product("p1", 10);

        assert!(draft.add_item(&p, "Fizz Co", "Beverages", 0, &[]).is_err());
        assert!(draft
            .add_item(&p, "Fizz Co", "Beverages", -2, &[])
            .is_err());
    }
}
