//! # Category Repository
//!
//! Database operations for categories. Deleting a category cascades to
//! its products through the schema's foreign keys.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use stockroom_core::Category;

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a new category.
    ///
    /// Fails with a foreign key violation if the brand does not exist;
    /// the service validates the reference first so this is a backstop.
    pub async fn insert(&self, category: &Category) -> DbResult<()> {
        debug!(id = %category.id, name = %category.name, "Inserting category");

        sqlx::query(
            "INSERT INTO categories (id, name, brand_id, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.brand_id)
        .bind(category.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a category by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, brand_id, created_at FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Lists all categories, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, brand_id, created_at FROM categories ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Lists categories belonging to a brand.
    pub async fn list_by_brand(&self, brand_id: &str) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, brand_id, created_at FROM categories \
             WHERE brand_id = ?1 ORDER BY created_at",
        )
        .bind(brand_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Deletes a category and, via foreign keys, its products.
    ///
    /// A missing id is a no-op, not an error.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting category (cascades to products)");

        sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
