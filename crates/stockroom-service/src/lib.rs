//! # stockroom-service: Domain Service for Stockroom
//!
//! The orchestration layer of the Stockroom system. This crate combines
//! the pure business logic from `stockroom-core` with the storage layer
//! from `stockroom-db` into the operations a presentation layer calls.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockroom Service Layer                            │
//! │                                                                         │
//! │  Presentation (CLI, desktop shell, HTTP API - out of scope)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              ★ StockroomService (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐        │   │
//! │  │  │ catalog  │  │  orders  │  │  stock   │  │ transfer │        │   │
//! │  │  │ brands   │  │ place    │  │ adjust   │  │ export   │        │   │
//! │  │  │ products │  │ advance  │  │ report   │  │ import   │        │   │
//! │  │  └──────────┘  └──────────┘  └──────────┘  └──────────┘        │   │
//! │  └──────┬───────────────────────────────────────────┬─────────────┘   │
//! │         │ policy, math                              │ SQL             │
//! │         ▼                                           ▼                 │
//! │   stockroom-core                              stockroom-db            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Brand/category/product CRUD with reference validation
//! - [`orders`] - Order placement and the forward-only lifecycle,
//!   including the exactly-once stock deduction on delivery
//! - [`stock`] - Manual stock adjustment and the availability report
//! - [`transfer`] - JSON/CSV export and JSON import with fresh ids
//! - [`error`] - [`ServiceError`] classification

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod orders;
pub mod stock;
pub mod transfer;

pub use error::{ServiceError, ServiceResult};
pub use orders::OrderItemRequest;
pub use stock::{StockAdjustment, StockReport};

use stockroom_db::{Database, DbConfig};

// =============================================================================
// Service Handle
// =============================================================================

/// The domain service handle.
///
/// Holds the database; all operations are defined in the sibling
/// modules as `impl StockroomService` blocks. Cloning is cheap (the
/// underlying pool is shared), so one service can be handed to many
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct StockroomService {
    db: Database,
}

impl StockroomService {
    /// Opens (or creates) the database at the configured path and
    /// returns a ready service. Migrations run unless disabled in the
    /// config.
    pub async fn open(config: DbConfig) -> ServiceResult<Self> {
        let db = Database::new(config).await?;
        Ok(StockroomService { db })
    }

    /// Wraps an existing database handle.
    pub fn new(db: Database) -> Self {
        StockroomService { db }
    }

    /// Access to the underlying database, for diagnostics.
    pub fn db(&self) -> &Database {
        &self.db
    }
}

// =============================================================================
// Shared Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod test_util {
    use super::*;
    use stockroom_core::{NewProduct, Product};

    /// Fresh service over an isolated in-memory database.
    pub async fn test_service() -> StockroomService {
        StockroomService::open(DbConfig::in_memory())
            .await
            .expect("in-memory database should open")
    }

    /// Seeds one brand, one category, and a product with the given
    /// stock. Returns the product.
    pub async fn seed_product(service: &StockroomService, name: &str, stock: i64) -> Product {
        let brand = service.add_brand("Fizz Co").await.unwrap();
        let category = service.add_category("Beverages", &brand.id).await.unwrap();
        service
            .add_product(NewProduct {
                name: name.to_string(),
                brand_id: brand.id.clone(),
                category_id: category.id.clone(),
                price_cents: 500,
                stock,
                description: None,
                image_url: None,
            })
            .await
            .unwrap()
    }
}
