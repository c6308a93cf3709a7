//! # Brand Repository
//!
//! Database operations for brands.
//!
//! Deleting a brand cascades to its categories and products through the
//! `ON DELETE CASCADE` foreign keys in the schema, so the whole cascade
//! is one atomic statement - a concurrent reader never sees a category
//! whose brand is gone.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::Brand;

/// Repository for brand database operations.
#[derive(Debug, Clone)]
pub struct BrandRepository {
    pool: SqlitePool,
}

impl BrandRepository {
    /// Creates a new BrandRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BrandRepository { pool }
    }

    /// Inserts a new brand.
    pub async fn insert(&self, brand: &Brand) -> DbResult<()> {
        debug!(id = %brand.id, name = %brand.name, "Inserting brand");

        sqlx::query("INSERT INTO brands (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&brand.id)
            .bind(&brand.name)
            .bind(brand.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Gets a brand by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Brand))` - Brand found
    /// * `Ok(None)` - Brand not found (callers display "Unknown")
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>(
            "SELECT id, name, created_at FROM brands WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(brand)
    }

    /// Lists all brands, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>(
            "SELECT id, name, created_at FROM brands ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(brands)
    }

    /// Deletes a brand and, via foreign keys, every category and
    /// product referencing it.
    ///
    /// A missing id is a no-op, not an error.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting brand (cascades to categories and products)");

        sqlx::query("DELETE FROM brands WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts brands (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
