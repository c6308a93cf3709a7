//! # Order Lifecycle Policy
//!
//! Forward-only status transitions for orders.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Lifecycle                                    │
//! │                                                                         │
//! │   ┌─────────┐  next()  ┌────────┐  next()  ┌───────────┐               │
//! │   │ Pending │ ───────► │ Packed │ ───────► │ Delivered │ (terminal)    │
//! │   └─────────┘          └────────┘          └───────────┘               │
//! │        │                    │                    │                      │
//! │        │ reserves stock     │ reserves stock     │ stock deducted       │
//! │        │                    │                    │ (exactly once)       │
//! │                                                                         │
//! │   No backward edges. No skipping: pending → delivered is               │
//! │   structurally forbidden; the controller only ever applies next().     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The order store itself overwrites status unconditionally; THIS module
//! is the policy layer that closes that gap. The service's controller
//! always derives the target status via [`OrderStatus::next`] and
//! checks it with [`validate_transition`] before writing.

use crate::error::{CoreError, CoreResult};
use crate::types::OrderStatus;

impl OrderStatus {
    /// The single legal next status, or `None` when terminal.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Packed),
            OrderStatus::Packed => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Whether this status holds a stock reservation.
    ///
    /// Delivered orders do not: their units have physically left the
    /// warehouse and were deducted from `Product.stock`.
    pub fn reserves_stock(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Packed)
    }

    /// Whether no further transition exists.
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

/// Checks that `from → to` is the single legal next step.
///
/// Rejects backward moves, self-moves, and skips (pending → delivered).
pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> CoreResult<()> {
    if from.next() == Some(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition { from, to })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_walks_forward_only() {
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::Packed));
        assert_eq!(OrderStatus::Packed.next(), Some(OrderStatus::Delivered));
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_terminal_and_reservation_flags() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Packed.is_terminal());
        assert!(OrderStatus::Delivered.is_terminal());

        assert!(OrderStatus::Pending.reserves_stock());
        assert!(OrderStatus::Packed.reserves_stock());
        assert!(!OrderStatus::Delivered.reserves_stock());
    }

    #[test]
    fn test_validate_transition_legal_edges() {
        assert!(validate_transition(OrderStatus::Pending, OrderStatus::Packed).is_ok());
        assert!(validate_transition(OrderStatus::Packed, OrderStatus::Delivered).is_ok());
    }

    #[test]
    fn test_validate_transition_rejects_skip_and_backward() {
        // Skipping packed is structurally forbidden.
        assert!(validate_transition(OrderStatus::Pending, OrderStatus::Delivered).is_err());
        // No backward edges.
        assert!(validate_transition(OrderStatus::Packed, OrderStatus::Pending).is_err());
        assert!(validate_transition(OrderStatus::Delivered, OrderStatus::Packed).is_err());
        // No self-moves.
        assert!(validate_transition(OrderStatus::Pending, OrderStatus::Pending).is_err());
    }
}
