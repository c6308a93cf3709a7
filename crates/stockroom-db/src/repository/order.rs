//! # Order Repository
//!
//! Database operations for orders and their item snapshots.
//!
//! ## Atomicity
//! An order and its items are inserted in one transaction: a concurrent
//! reader sees either the whole order or nothing. Delivery is likewise
//! one transaction - the status compare-and-set and every stock
//! deduction commit together, so no reader can observe a delivered
//! order whose stock is still undeducted.
//!
//! ## Status Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update_status(id, status)        - store-layer overwrite, no policy   │
//! │  transition_status(id, from, to)  - CAS: succeeds only if the order    │
//! │                                     still has status `from`            │
//! │  deliver(id, items)               - CAS packed → delivered PLUS all    │
//! │                                     stock deductions, one transaction  │
//! │                                                                         │
//! │  Two staff both click "Delivered":                                     │
//! │    deliver #1: CAS wins  (1 row)  → deductions commit with the status  │
//! │    deliver #2: CAS loses (0 rows) → rollback, deducts nothing          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::{Order, OrderItem, OrderStatus};

const ITEM_COLUMNS: &str =
    "product_id, product_name, brand_id, brand_name, category_id, category_name, quantity";

/// Order header row; items are stored in `order_items`.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    shopkeeper_name: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            shopkeeper_name: self.shopkeeper_name,
            items,
            created_at: self.created_at,
            status: self.status,
        }
    }
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts an order with its items in one transaction.
    ///
    /// ## Snapshot Pattern
    /// Item rows carry product/brand/category names frozen at order
    /// time; nothing here consults the catalog tables.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        debug!(
            id = %order.id,
            shopkeeper = %order.shopkeeper_name,
            items = order.items.len(),
            "Inserting order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, shopkeeper_name, status, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&order.id)
        .bind(&order.shopkeeper_name)
        .bind(order.status)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                "INSERT INTO order_items \
                 (order_id, product_id, product_name, brand_id, brand_name, \
                  category_id, category_name, quantity) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .bind(&order.id)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(&item.brand_id)
            .bind(&item.brand_name)
            .bind(&item.category_id)
            .bind(&item.category_name)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets an order (with items) by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, shopkeeper_name, status, created_at FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let items = self.get_items(id).await?;
                Ok(Some(row.into_order(items)))
            }
            None => Ok(None),
        }
    }

    /// Lists all orders (with items), oldest first.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, shopkeeper_name, status, created_at FROM orders ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.get_items(&row.id).await?;
            orders.push(row.into_order(items));
        }

        Ok(orders)
    }

    /// Gets the item snapshots for an order, in insertion order.
    async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let sql =
            format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY id");
        let items = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Overwrites an order's status unconditionally.
    ///
    /// This is the raw store operation: it enforces NO transition
    /// policy. The lifecycle controller in the service layer is the
    /// only caller that should drive status forward; it uses
    /// [`transition_status`](Self::transition_status) instead.
    ///
    /// ## Returns
    /// * `Ok(true)` - Status written
    /// * `Ok(false)` - No order with that id (no-op)
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> DbResult<bool> {
        debug!(id = %id, status = %status, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Compare-and-set status transition.
    ///
    /// Writes `to` only if the order currently has status `from`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Transition applied (this caller won the race)
    /// * `Ok(false)` - Order missing or no longer in `from`
    pub async fn transition_status(
        &self,
        id: &str,
        from: OrderStatus,
        to: OrderStatus,
    ) -> DbResult<bool> {
        debug!(id = %id, from = %from, to = %to, "Transitioning order status");

        let result = sqlx::query("UPDATE orders SET status = ?3 WHERE id = ?1 AND status = ?2")
            .bind(id)
            .bind(from)
            .bind(to)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Marks an order delivered and deducts its stock, atomically.
    ///
    /// The packed → delivered compare-and-set and every item's
    /// deduction (`MAX(0, stock - qty)`, clamped at zero) run inside
    /// one transaction: a concurrent reader sees the order delivered
    /// and the stock deducted together, or neither. A mid-deduction
    /// failure rolls the status back too.
    ///
    /// Items whose product no longer exists deduct nothing; their
    /// snapshot is all that remains of the product.
    ///
    /// ## Returns
    /// * `Ok(true)` - This caller won the CAS; status and stock written
    /// * `Ok(false)` - Order missing or not `packed`; nothing written
    pub async fn deliver(&self, id: &str, items: &[OrderItem]) -> DbResult<bool> {
        debug!(id = %id, items = items.len(), "Delivering order");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE orders SET status = ?3 WHERE id = ?1 AND status = ?2")
            .bind(id)
            .bind(OrderStatus::Packed)
            .bind(OrderStatus::Delivered)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            // CAS lost; dropping the transaction rolls back.
            return Ok(false);
        }

        for item in items {
            let result =
                sqlx::query("UPDATE products SET stock = MAX(0, stock - ?2) WHERE id = ?1")
                    .bind(&item.product_id)
                    .bind(item.quantity)
                    .execute(&mut *tx)
                    .await?;

            if result.rows_affected() == 0 {
                debug!(
                    order = %id,
                    product = %item.product_id,
                    "Delivered item references a deleted product, nothing to deduct"
                );
            }
        }

        tx.commit().await?;

        Ok(true)
    }

    /// Deletes an order and its items (via foreign key cascade).
    ///
    /// Permitted from any status and has no stock side effects; a
    /// missing id is a no-op.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stockroom_core::{Brand, Category, Product};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, id: &str, stock: i64) -> Product {
        let now = Utc::now();
        db.brands()
            .insert(&Brand {
                id: "b1".to_string(),
                name: "Fizz Co".to_string(),
                created_at: now,
            })
            .await
            .unwrap();
        db.categories()
            .insert(&Category {
                id: "c1".to_string(),
                name: "Beverages".to_string(),
                brand_id: "b1".to_string(),
                created_at: now,
            })
            .await
            .unwrap();
        let product = Product {
            id: id.to_string(),
            name: "Cola 330ml".to_string(),
            brand_id: "b1".to_string(),
            category_id: "c1".to_string(),
            price_cents: 500,
            stock,
            description: None,
            image_url: None,
            created_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    fn order_for(id: &str, product: &Product, quantity: i64, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            shopkeeper_name: "Ali General Store".to_string(),
            items: vec![OrderItem::from_product(
                product,
                "Fizz Co",
                "Beverages",
                quantity,
            )],
            created_at: Utc::now(),
            status,
        }
    }

    #[tokio::test]
    async fn test_deliver_writes_status_and_stock_together() {
        let db = test_db().await;
        let product = seed_product(&db, "p1", 10).await;
        let order = order_for("o1", &product, 4, OrderStatus::Packed);
        db.orders().insert(&order).await.unwrap();

        let won = db.orders().deliver("o1", &order.items).await.unwrap();
        assert!(won);

        let order = db.orders().get_by_id("o1").await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        let product = db.products().get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(product.stock, 6);
    }

    #[tokio::test]
    async fn test_deliver_cas_loser_deducts_nothing() {
        let db = test_db().await;
        let product = seed_product(&db, "p1", 10).await;
        let order = order_for("o1", &product, 4, OrderStatus::Packed);
        db.orders().insert(&order).await.unwrap();

        assert!(db.orders().deliver("o1", &order.items).await.unwrap());
        // Second delivery of the same order loses the CAS and must not
        // deduct a second time.
        assert!(!db.orders().deliver("o1", &order.items).await.unwrap());

        let product = db.products().get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(product.stock, 6);
    }

    #[tokio::test]
    async fn test_deliver_requires_packed_status() {
        let db = test_db().await;
        let product = seed_product(&db, "p1", 10).await;
        let order = order_for("o1", &product, 4, OrderStatus::Pending);
        db.orders().insert(&order).await.unwrap();

        assert!(!db.orders().deliver("o1", &order.items).await.unwrap());

        // Nothing written: status and stock both unchanged.
        let order = db.orders().get_by_id("o1").await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        let product = db.products().get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(product.stock, 10);
    }

    #[tokio::test]
    async fn test_deliver_clamps_stock_at_zero() {
        let db = test_db().await;
        let product = seed_product(&db, "p1", 2).await;
        let order = order_for("o1", &product, 5, OrderStatus::Packed);
        db.orders().insert(&order).await.unwrap();

        assert!(db.orders().deliver("o1", &order.items).await.unwrap());

        let product = db.products().get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(product.stock, 0);
    }

    #[tokio::test]
    async fn test_deliver_skips_deleted_products() {
        let db = test_db().await;
        let product = seed_product(&db, "p1", 10).await;
        let order = order_for("o1", &product, 4, OrderStatus::Packed);
        db.orders().insert(&order).await.unwrap();

        db.products().delete("p1").await.unwrap();

        assert!(db.orders().deliver("o1", &order.items).await.unwrap());
        let order = db.orders().get_by_id("o1").await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_update_status_overwrites_unconditionally() {
        let db = test_db().await;
        let product = seed_product(&db, "p1", 10).await;
        let order = order_for("o1", &product, 4, OrderStatus::Pending);
        db.orders().insert(&order).await.unwrap();

        // Raw store write: no transition policy, any status goes.
        assert!(db
            .orders()
            .update_status("o1", OrderStatus::Delivered)
            .await
            .unwrap());

        let order = db.orders().get_by_id("o1").await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        // And it never touches stock; that is deliver()'s job.
        let product = db.products().get_by_id("p1").await.unwrap().unwrap();
        assert_eq!(product.stock, 10);
    }

    #[tokio::test]
    async fn test_update_status_missing_order_is_noop() {
        let db = test_db().await;

        assert!(!db
            .orders()
            .update_status("nope", OrderStatus::Packed)
            .await
            .unwrap());
    }
}
