//! # Product Repository
//!
//! Database operations for products, including the atomic stock
//! adjustment the manual-correction path depends on. Delivery
//! deduction lives in the order repository, transactionally bound to
//! the status flip.
//!
//! ## Competing Writers on `stock`
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Why stock updates are single statements                 │
//! │                                                                         │
//! │  ❌ WRONG: read-modify-write in Rust (lost-update race)                │
//! │     let p = get_by_id(id);                                             │
//! │     set_stock(id, p.stock + delta);  ← a concurrent delivery lands    │
//! │                                        between read and write; its    │
//! │                                        deduction is silently undone   │
//! │                                                                         │
//! │  ✅ CORRECT: arithmetic inside the UPDATE                              │
//! │     UPDATE products SET stock = stock + ? WHERE id = ? AND ...         │
//! │                                                                         │
//! │  SQLite serializes the statements, so delivery deductions and          │
//! │  manual adjustments compose correctly.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockroom_core::Product;

const PRODUCT_COLUMNS: &str =
    "id, name, brand_id, category_id, price_cents, stock, description, image_url, created_at";

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Lists all products, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Lists products belonging to a brand.
    pub async fn list_by_brand(&self, brand_id: &str) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE brand_id = ?1 ORDER BY created_at"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(brand_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Lists products belonging to a category.
    pub async fn list_by_category(&self, category_id: &str) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = ?1 ORDER BY created_at"
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            "INSERT INTO products \
             (id, name, brand_id, category_id, price_cents, stock, description, image_url, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.brand_id)
        .bind(&product.category_id)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.description)
        .bind(&product.image_url)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product (full row write).
    ///
    /// The service computes partial merges; by the time a write reaches
    /// here it is the complete post-merge row, applied in one statement.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let result = sqlx::query(
            "UPDATE products SET \
             name = ?2, brand_id = ?3, category_id = ?4, price_cents = ?5, \
             stock = ?6, description = ?7, image_url = ?8 \
             WHERE id = ?1",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.brand_id)
        .bind(&product.category_id)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(&product.description)
        .bind(&product.image_url)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Applies a relative stock adjustment, refusing a negative result.
    ///
    /// The guard is inside the statement: `stock + delta >= 0` is
    /// evaluated against the CURRENT stored value, not a value read
    /// earlier, which closes the race with concurrent deductions.
    ///
    /// ## Returns
    /// * `Ok(true)` - Adjustment applied
    /// * `Ok(false)` - Refused: the row exists but the result would be
    ///   negative (caller re-reads to report the exact value)
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn adjust_stock_checked(&self, id: &str, delta: i64) -> DbResult<bool> {
        debug!(id = %id, delta = %delta, "Adjusting stock (checked)");

        let result =
            sqlx::query("UPDATE products SET stock = stock + ?2 WHERE id = ?1 AND stock + ?2 >= 0")
                .bind(id)
                .bind(delta)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Distinguish "missing" from "would go negative".
        match self.get_by_id(id).await? {
            Some(_) => Ok(false),
            None => Err(DbError::not_found("Product", id)),
        }
    }

    /// Sets stock to an absolute value.
    ///
    /// The caller validates `value >= 0` first; the schema CHECK would
    /// reject it anyway.
    pub async fn set_stock(&self, id: &str, value: i64) -> DbResult<()> {
        debug!(id = %id, value = %value, "Setting stock");

        let result = sqlx::query("UPDATE products SET stock = ?2 WHERE id = ?1")
            .bind(id)
            .bind(value)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product. No cascade: products are terminal entities,
    /// and historical order items keep their snapshots.
    ///
    /// A missing id is a no-op, not an error.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
