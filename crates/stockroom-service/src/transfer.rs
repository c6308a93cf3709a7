//! # Order Import/Export
//!
//! Bulk order exchange at the service boundary.
//!
//! Export serializes the full order list (encodings live in
//! `stockroom-core::transfer`). Import parses the JSON dump and stores
//! every order under a FRESH id, so importing a file into the database
//! it came from duplicates the orders instead of colliding with them.
//! Import never touches stock, whatever statuses the dump carries: a
//! delivered order arrives delivered, its deduction already reflected
//! in whatever stock numbers the operator maintains separately.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use stockroom_core::transfer::{orders_from_json, orders_to_csv, orders_to_json};
use stockroom_core::Order;

use crate::error::ServiceResult;
use crate::StockroomService;

/// Suggested file name for an export, e.g. `orders_2026-08-27.json`.
pub fn export_file_name(extension: &str) -> String {
    format!("orders_{}.{}", Utc::now().format("%Y-%m-%d"), extension)
}

impl StockroomService {
    /// Exports all orders as the structured JSON dump.
    pub async fn export_orders_json(&self) -> ServiceResult<String> {
        let orders = self.db().orders().list().await?;
        Ok(orders_to_json(&orders)?)
    }

    /// Exports all orders as the flattened CSV table, one row per item.
    pub async fn export_orders_csv(&self) -> ServiceResult<String> {
        let orders = self.db().orders().list().await?;
        Ok(orders_to_csv(&orders)?)
    }

    /// Imports orders from a JSON dump.
    ///
    /// Each order is stored under a fresh id; shopkeeper name, items,
    /// status, and creation timestamp are preserved as exported. The
    /// imported orders (with their new ids) are returned. Malformed
    /// JSON fails before anything is written.
    pub async fn import_orders_json(&self, data: &str) -> ServiceResult<Vec<Order>> {
        let parsed = orders_from_json(data)?;

        let mut imported = Vec::with_capacity(parsed.len());
        for mut order in parsed {
            order.id = Uuid::new_v4().to_string();
            self.db().orders().insert(&order).await?;
            imported.push(order);
        }

        info!(count = imported.len(), "Orders imported");
        Ok(imported)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
