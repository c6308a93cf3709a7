//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom, a catalog and order-taking
//! system for a single-warehouse distribution business. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockroom Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation (out of scope)                    │   │
//! │  │    Catalog UI ──► Order UI ──► Stock Analysis UI                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    stockroom-service                            │   │
//! │  │    add_product, place_order, advance_order, adjust_stock        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ stockroom-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────────┐ ┌─────────┐ ┌───────────┐         │   │
//! │  │  │  types  │ │ reservation │ │  draft  │ │ lifecycle │         │   │
//! │  │  │ Product │ │ Availability│ │  Order  │ │  pending  │         │   │
//! │  │  │  Order  │ │ StockHealth │ │  Draft  │ │  →packed  │         │   │
//! │  │  └─────────┘ └─────────────┘ └─────────┘ └───────────┘         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  stockroom-db (Database Layer)                  │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Brand, Category, Product, Order)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and lenient numeric coercion
//! - [`reservation`] - Reserved/available stock computation and reporting
//! - [`draft`] - Order composition with availability checks
//! - [`lifecycle`] - Forward-only order status policy
//! - [`transfer`] - JSON/CSV interchange encodings
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Derived, not cached**: availability is always recomputed from the
//!    orders passed in; there is no reservation cache to go stale

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod lifecycle;
pub mod reservation;
pub mod transfer;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockroom_core::Product` instead of
// `use stockroom_core::types::Product`

pub use draft::OrderDraft;
pub use error::{CoreError, CoreResult, ValidationError};
pub use reservation::{Availability, StockHealth, StockSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Available quantity at or below which a product counts as "low stock".
///
/// ## Business Reason
/// Staff restock from the wholesaler weekly; five units is roughly one
/// day of shopkeeper orders for a fast mover.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum distinct products allowed in a single order draft.
///
/// ## Business Reason
/// Prevents runaway drafts and keeps a single order packable in one trip.
pub const MAX_DRAFT_ITEMS: usize = 100;

/// Maximum quantity of a single product per order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
