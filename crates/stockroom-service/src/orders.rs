//! # Order Operations
//!
//! Order placement and the lifecycle controller.
//!
//! ## Delivery: Exactly-Once Deduction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            advance_order(id) on a packed order                          │
//! │                                                                         │
//! │  1. read order, target = status.next()        (delivered)              │
//! │  2. OrderRepository::deliver - ONE transaction holding both the        │
//! │     CAS (UPDATE status WHERE status = packed) and every item's         │
//! │     stock deduction, clamped at zero                                   │
//! │       │                                                                 │
//! │       ├── CAS won: status and deductions commit together; no reader    │
//! │       │            ever sees a delivered order with undeducted stock   │
//! │       │                                                                 │
//! │       └── CAS lost: a concurrent caller already advanced it; the       │
//! │                     transaction rolls back, NO deduction here          │
//! │                                                                         │
//! │  The CAS is the idempotence guard: two staff both marking the same     │
//! │  order delivered deduct stock once, not twice.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deduction happens once per product lifetime of an order because the
//! only edge into `delivered` is the CAS above, and `delivered` is
//! terminal.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use stockroom_core::validation::validate_shopkeeper_name;
use stockroom_core::{Order, OrderDraft, OrderStatus, ValidationError};

use crate::error::{ServiceError, ServiceResult};
use crate::StockroomService;

/// One requested line when placing an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

impl StockroomService {
    // =========================================================================
    // Placement
    // =========================================================================

    /// Places an order for a shopkeeper.
    ///
    /// Every requested line is validated against availability (total
    /// stock minus what pending/packed orders have reserved, minus
    /// earlier lines of this same request). On success the order is
    /// stored as `pending`; nothing is written on failure.
    ///
    /// Brand and category names are snapshotted into the items, with
    /// "Unknown" standing in for dangling references.
    pub async fn place_order(
        &self,
        shopkeeper_name: &str,
        requests: &[OrderItemRequest],
    ) -> ServiceResult<Order> {
        let shopkeeper_name = validate_shopkeeper_name(shopkeeper_name)?;

        if requests.is_empty() {
            return Err(ValidationError::NoItems.into());
        }

        // Availability is computed against the order list as of now;
        // the draft handles intra-request accumulation itself.
        let orders = self.db().orders().list().await?;

        let mut draft = OrderDraft::new();
        for request in requests {
            let product = self.get_product(&request.product_id).await?;
            let brand_name = self.brand_display_name(&product.brand_id).await?;
            let category_name = self.category_display_name(&product.category_id).await?;

            draft.add_item(
                &product,
                &brand_name,
                &category_name,
                request.quantity,
                &orders,
            )?;
        }

        let order = Order {
            id: Uuid::new_v4().to_string(),
            shopkeeper_name,
            items: draft.into_items(),
            created_at: Utc::now(),
            status: OrderStatus::Pending,
        };

        self.db().orders().insert(&order).await?;
        info!(
            id = %order.id,
            shopkeeper = %order.shopkeeper_name,
            items = order.items.len(),
            "Order placed"
        );

        Ok(order)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Gets an order by id.
    pub async fn get_order(&self, id: &str) -> ServiceResult<Order> {
        self.db()
            .orders()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", id))
    }

    /// Lists all orders, oldest first.
    pub async fn list_orders(&self) -> ServiceResult<Vec<Order>> {
        Ok(self.db().orders().list().await?)
    }

    // =========================================================================
    // Lifecycle Controller
    // =========================================================================

    /// Advances an order one step: pending → packed → delivered.
    ///
    /// The target is always derived from the current status, so skips
    /// and backward moves cannot be expressed. Advancing a delivered
    /// order fails with [`ServiceError::Conflict`].
    ///
    /// When the step lands on `delivered`, each item's quantity is
    /// deducted from its product's stock, clamped at zero, in the SAME
    /// transaction as the status write. Items whose product has been
    /// deleted deduct nothing.
    ///
    /// Losing the compare-and-set race (someone else advanced the order
    /// in between) is not an error: the current order is returned and
    /// no deduction runs here.
    pub async fn advance_order(&self, id: &str) -> ServiceResult<Order> {
        let order = self.get_order(id).await?;

        let target = match order.status.next() {
            Some(target) => target,
            None => {
                return Err(ServiceError::Conflict(
                    stockroom_core::CoreError::OrderAlreadyDelivered(order.id),
                ))
            }
        };

        let won = match target {
            // Delivery commits the status flip and all deductions as
            // one transaction; the CAS inside it is the guard.
            OrderStatus::Delivered => self.db().orders().deliver(id, &order.items).await?,
            _ => {
                self.db()
                    .orders()
                    .transition_status(id, order.status, target)
                    .await?
            }
        };

        if !won {
            // A concurrent caller moved the order first; its deduction
            // (if any) already happened there.
            info!(id = %id, "Order advanced concurrently, returning current state");
            return self.get_order(id).await;
        }

        info!(id = %id, from = %order.status, to = %target, "Order advanced");

        self.get_order(id).await
    }

    /// Deletes an order from any status.
    ///
    /// Never touches stock: a pending/packed delete releases its
    /// reservation implicitly (reservations are derived, not stored),
    /// and a delivered delete must not restore already-shipped units.
    /// A missing id is a no-op.
    pub async fn delete_order(&self, id: &str) -> ServiceResult<()> {
        self.db().orders().delete(id).await?;
        info!(id = %id, "Order deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
