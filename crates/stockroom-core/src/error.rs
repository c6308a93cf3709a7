//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Storage operation failures                     │
//! │                                                                         │
//! │  stockroom-service errors                                              │
//! │  └── ServiceError     - Classified for the presentation layer          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ServiceError → user message       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities, ids)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are detected
/// before any state mutation, so a caller that receives one can assume
/// nothing changed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough available (unreserved) stock to satisfy a line item.
    ///
    /// `remaining` already accounts for quantities reserved by other
    /// outstanding orders AND quantities staged earlier in the same
    /// draft, so the message shows the true shortfall.
    #[error(
        "Insufficient stock for {product}: requested {requested}, only {remaining} available"
    )]
    InsufficientStock {
        product: String,
        requested: i64,
        remaining: i64,
    },

    /// A manual stock adjustment would drive stock below zero.
    ///
    /// The resulting value is reported (not silently clamped) so the
    /// operator can correct the input.
    #[error("Stock adjustment rejected: resulting stock would be {resulting}")]
    NegativeStock { resulting: i64 },

    /// A status transition that is not the single legal next step.
    ///
    /// The lifecycle is forward-only and skips nothing:
    /// pending → packed → delivered.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The order is already delivered; delivered is terminal.
    #[error("Order {0} is already delivered")]
    OrderAlreadyDelivered(String),

    /// Draft has exceeded the maximum number of distinct products.
    #[error("Order draft cannot have more than {max} items")]
    DraftTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Numeric shortfall for insufficient-stock errors, 0 otherwise.
    pub fn shortfall(&self) -> i64 {
        match self {
            CoreError::InsufficientStock {
                requested,
                remaining,
                ..
            } => requested - remaining,
            _ => 0,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when input doesn't meet requirements. Used for early
/// validation before any business logic runs or state changes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty after trimming.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// A referenced entity does not exist (e.g., brand id on a product).
    #[error("{field} does not reference an existing {entity}: {id}")]
    UnknownReference {
        field: &'static str,
        entity: &'static str,
        id: String,
    },

    /// An order must contain at least one item.
    #[error("order must contain at least one item")]
    NoItems,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message_names_product_and_numbers() {
        let err = CoreError::InsufficientStock {
            product: "Cola 330ml".to_string(),
            requested: 4,
            remaining: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Cola 330ml: requested 4, only 3 available"
        );
        assert_eq!(err.shortfall(), 1);
    }

    #[test]
    fn test_negative_stock_message_shows_resulting_value() {
        let err = CoreError::NegativeStock { resulting: -2 };
        assert_eq!(
            err.to_string(),
            "Stock adjustment rejected: resulting stock would be -2"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::UnknownReference {
            field: "brandId",
            entity: "brand",
            id: "missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "brandId does not reference an existing brand: missing"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NoItems;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
