//! # Validation Module
//!
//! Input validation utilities for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  ├── Basic format checks, numeric coercion of form input               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Service boundary                                             │
//! │  └── THIS MODULE: required fields, ranges, references                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (brand, category, or product).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed name; entities are always stored trimmed.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_name;
///
/// assert_eq!(validate_name("name", "  Cola 330ml ").unwrap(), "Cola 330ml");
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &'static str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong { field, max: 200 });
    }

    Ok(name.to_string())
}

/// Validates a shopkeeper name on an order.
///
/// Same rules as [`validate_name`], kept separate so the error names
/// the right field.
pub fn validate_shopkeeper_name(name: &str) -> ValidationResult<String> {
    validate_name("shopkeeperName", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional items)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price",
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock",
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Lenient Coercion
// =============================================================================
// Form input arrives as text. Non-numeric input coerces to 0 rather than
// erroring; negative values still fail the validators above.

/// Coerces a price string to cents. Non-numeric input becomes 0.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::coerce_price_cents;
///
/// assert_eq!(coerce_price_cents("10.99"), 1099);
/// assert_eq!(coerce_price_cents("abc"), 0);
/// assert_eq!(coerce_price_cents(""), 0);
/// ```
pub fn coerce_price_cents(input: &str) -> i64 {
    input
        .trim()
        .parse::<f64>()
        .map(|v| (v * 100.0).round() as i64)
        .unwrap_or(0)
}

/// Coerces a stock string to a whole quantity. Non-numeric input becomes 0.
///
/// Fractional input truncates toward zero (stock is counted in units).
pub fn coerce_stock(input: &str) -> i64 {
    let input = input.trim();
    input
        .parse::<i64>()
        .or_else(|_| input.parse::<f64>().map(|v| v.trunc() as i64))
        .unwrap_or(0)
}

// =============================================================================
// Unit Tests
// =============================================================================
