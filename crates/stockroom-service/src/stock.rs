//! # Stock Operations
//!
//! Manual stock adjustment and the availability report.
//!
//! ## Adjustment Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Relative(+5)   stock += 5                                             │
//! │  Relative(-8)   stock -= 8, REFUSED if the result would be negative    │
//! │  Absolute(12)   stock = 12, REFUSED if the value is negative           │
//! │                                                                         │
//! │  Refusal is a hard error carrying the offending resulting value;       │
//! │  adjustments never clamp. Clamping is reserved for delivery            │
//! │  deduction, where physical shipment is a fact to record either way.    │
//! │                                                                         │
//! │  The relative guard runs INSIDE the UPDATE statement, against the     │
//! │  stored value at execution time, so a concurrent delivery deduction   │
//! │  cannot sneak stock below the checked threshold.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Adjustment is independent of reservations: it may set stock below the
//! currently reserved quantity. The report then shows availability 0 and
//! delivery clamps at zero.

use serde::{Deserialize, Serialize};
use tracing::info;

use stockroom_core::reservation::{self, Availability, StockHealth, StockSummary};
use stockroom_core::{validation::validate_stock, CoreError, Product};

use crate::error::{ServiceError, ServiceResult};
use crate::StockroomService;

/// A manual stock correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockAdjustment {
    /// Add (positive) or remove (negative) units.
    Relative(i64),
    /// Set the on-hand count outright, e.g. after a physical recount.
    Absolute(i64),
}

/// The full stock analysis: classified entries plus headline counts.
///
/// Entries are sorted for display: out-of-stock first, then low-stock,
/// then ascending available quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub entries: Vec<StockHealth>,
    pub summary: StockSummary,
}

impl StockroomService {
    // =========================================================================
    // Adjustment
    // =========================================================================

    /// Applies a manual stock adjustment and returns the updated product.
    ///
    /// ## Errors
    /// * [`ServiceError::Conflict`] with `NegativeStock` when the result
    ///   would be negative; the stored stock is unchanged
    /// * [`ServiceError::NotFound`] when the product doesn't exist
    pub async fn adjust_stock(
        &self,
        product_id: &str,
        adjustment: StockAdjustment,
    ) -> ServiceResult<Product> {
        match adjustment {
            StockAdjustment::Absolute(value) => {
                if validate_stock(value).is_err() {
                    return Err(ServiceError::Conflict(CoreError::NegativeStock {
                        resulting: value,
                    }));
                }
                self.db().products().set_stock(product_id, value).await?;
            }
            StockAdjustment::Relative(delta) => {
                let applied = self.db().products().adjust_stock_checked(product_id, delta).await?;
                if !applied {
                    // Re-read for the exact value the operator tried to
                    // produce; stock may have moved since the refusal.
                    let product = self.get_product(product_id).await?;
                    return Err(ServiceError::Conflict(CoreError::NegativeStock {
                        resulting: product.stock + delta,
                    }));
                }
            }
        }

        let product = self.get_product(product_id).await?;
        info!(
            id = %product.id,
            stock = product.stock,
            ?adjustment,
            "Stock adjusted"
        );

        Ok(product)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Availability triple (total/reserved/available) for one product.
    pub async fn availability(&self, product_id: &str) -> ServiceResult<Availability> {
        let product = self.get_product(product_id).await?;
        let orders = self.db().orders().list().await?;

        Ok(reservation::availability(&product, &orders))
    }

    /// The stock analysis report over the whole catalog.
    pub async fn stock_report(&self) -> ServiceResult<StockReport> {
        let products = self.db().products().list().await?;
        let orders = self.db().orders().list().await?;

        let entries = reservation::analyze_stock(&products, &orders);
        let summary = reservation::summarize(&entries);

        Ok(StockReport { entries, summary })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{seed_product, test_service};
    use crate::OrderItemRequest;

    fn request(product_id: &str, quantity: i64) -> OrderItemRequest {
        OrderItemRequest {
            product_id: product_id.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_relative_adjustment_both_directions() {
        let service = test_service().await;
        let product = seed_product(&service, "Cola 330ml", 10).await;

        let product = service
            .adjust_stock(&product.id, StockAdjustment::Relative(5))
            .await
            .unwrap();
        assert_eq!(product.stock, 15);

        let product = service
            .adjust_stock(&product.id, StockAdjustment::Relative(-15))
            .await
            .unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_negative_result_is_refused_with_value() {
        let service = test_service().await;
        let product = seed_product(&service, "Cola 330ml", 3).await;

        let err = service
            .adjust_stock(&product.id, StockAdjustment::Relative(-5))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Stock adjustment rejected: resulting stock would be -2"
        );

        let err = service
            .adjust_stock(&product.id, StockAdjustment::Absolute(-1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // Refusals never clamp or write
        assert_eq!(service.get_product(&product.id).await.unwrap().stock, 3);
    }

    #[tokio::test]
    async fn test_absolute_adjustment_after_recount() {
        let service = test_service().await;
        let product = seed_product(&service, "Cola 330ml", 10).await;

        let product = service
            .adjust_stock(&product.id, StockAdjustment::Absolute(0))
            .await
            .unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_adjust_missing_product_is_not_found() {
        let service = test_service().await;

        let err = service
            .adjust_stock("nope", StockAdjustment::Relative(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_adjustment_may_undercut_reservations() {
        let service = test_service().await;
        let product = seed_product(&service, "Cola 330ml", 10).await;
        service
            .place_order("Ali", &[request(&product.id, 8)])
            .await
            .unwrap();

        // Legal even though 8 are reserved
        service
            .adjust_stock(&product.id, StockAdjustment::Absolute(2))
            .await
            .unwrap();

        let availability = service.availability(&product.id).await.unwrap();
        assert_eq!(availability.total, 2);
        assert_eq!(availability.reserved, 8);
        assert_eq!(availability.available, 0);
    }

    #[tokio::test]
    async fn test_availability_triple() {
        // stock 10, pending 4, packed 3 → available 3
        let service = test_service().await;
        let product = seed_product(&service, "Cola 330ml", 10).await;

        service
            .place_order("Shop A", &[request(&product.id, 4)])
            .await
            .unwrap();
        let packed = service
            .place_order("Shop B", &[request(&product.id, 3)])
            .await
            .unwrap();
        service.advance_order(&packed.id).await.unwrap();

        let availability = service.availability(&product.id).await.unwrap();
        assert_eq!(availability.total, 10);
        assert_eq!(availability.reserved, 7);
        assert_eq!(availability.available, 3);
    }

    #[tokio::test]
    async fn test_delivered_orders_stop_reserving() {
        let service = test_service().await;
        let product = seed_product(&service, "Cola 330ml", 10).await;

        let order = service
            .place_order("Ali", &[request(&product.id, 4)])
            .await
            .unwrap();
        service.advance_order(&order.id).await.unwrap();
        service.advance_order(&order.id).await.unwrap();

        // Stock fell to 6, reservation vanished
        let availability = service.availability(&product.id).await.unwrap();
        assert_eq!(availability.total, 6);
        assert_eq!(availability.reserved, 0);
        assert_eq!(availability.available, 6);
    }

    #[tokio::test]
    async fn test_stock_report_orders_and_counts() {
        let service = test_service().await;
        let brand = service.add_brand("Fizz Co").await.unwrap();
        let category = service.add_category("Beverages", &brand.id).await.unwrap();

        let add = |name: &str, stock: i64| {
            let service = service.clone();
            let brand_id = brand.id.clone();
            let category_id = category.id.clone();
            let name = name.to_string();
            async move {
                service
                    .add_product(stockroom_core::NewProduct {
                        name,
                        brand_id,
                        category_id,
                        price_cents: 500,
                        stock,
                        description: None,
                        image_url: None,
                    })
                    .await
                    .unwrap()
            }
        };

        add("Empty", 0).await;
        add("Low", 3).await;
        add("Healthy", 50).await;

        let report = service.stock_report().await.unwrap();
        assert_eq!(report.summary.out_of_stock, 1);
        assert_eq!(report.summary.low_stock, 1);
        assert_eq!(report.summary.healthy, 1);

        let names: Vec<&str> = report
            .entries
            .iter()
            .map(|e| e.product.name.as_str())
            .collect();
        assert_eq!(names, ["Empty", "Low", "Healthy"]);
    }
}
