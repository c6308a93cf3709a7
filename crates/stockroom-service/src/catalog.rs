//! # Catalog Operations
//!
//! Brand, category, and product management.
//!
//! ## Hierarchy and Cascades
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Brand ──► Category ──► Product                                       │
//! │                                                                         │
//! │   delete_brand(b)     removes b, its categories, and their products    │
//! │   delete_category(c)  removes c and its products                       │
//! │   delete_product(p)   removes only p                                   │
//! │                                                                         │
//! │   Cascades run inside SQLite (ON DELETE CASCADE), so each delete is    │
//! │   one atomic statement. Order item snapshots are never touched.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Creation validates upward references (a category's brand, a
//! product's brand and category) so a dangling reference can only arise
//! later, from a delete - at which point the cascade removes the
//! dependents anyway.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use stockroom_core::validation::{
    validate_name, validate_price_cents, validate_stock,
};
use stockroom_core::{Brand, Category, NewProduct, Product, ProductPatch, ValidationError};

use crate::error::{ServiceError, ServiceResult};
use crate::StockroomService;

/// Display name used when a snapshot references a deleted entity.
pub(crate) const UNKNOWN_NAME: &str = "Unknown";

impl StockroomService {
    // =========================================================================
    // Brands
    // =========================================================================

    /// Creates a brand from a display name.
    pub async fn add_brand(&self, name: &str) -> ServiceResult<Brand> {
        let name = validate_name("name", name)?;

        let brand = Brand {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
        };

        self.db().brands().insert(&brand).await?;
        info!(id = %brand.id, name = %brand.name, "Brand created");

        Ok(brand)
    }

    /// Gets a brand by id.
    pub async fn get_brand(&self, id: &str) -> ServiceResult<Brand> {
        self.db()
            .brands()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("brand", id))
    }

    /// Lists all brands, oldest first.
    pub async fn list_brands(&self) -> ServiceResult<Vec<Brand>> {
        Ok(self.db().brands().list().await?)
    }

    /// Deletes a brand and, by cascade, its categories and products.
    ///
    /// A missing id is a no-op. Existing order items keep their brand
    /// name snapshots.
    pub async fn delete_brand(&self, id: &str) -> ServiceResult<()> {
        self.db().brands().delete(id).await?;
        info!(id = %id, "Brand deleted (with categories and products)");
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Creates a category under an existing brand.
    pub async fn add_category(&self, name: &str, brand_id: &str) -> ServiceResult<Category> {
        let name = validate_name("name", name)?;

        if self.db().brands().get_by_id(brand_id).await?.is_none() {
            return Err(ValidationError::UnknownReference {
                field: "brandId",
                entity: "brand",
                id: brand_id.to_string(),
            }
            .into());
        }

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name,
            brand_id: brand_id.to_string(),
            created_at: Utc::now(),
        };

        self.db().categories().insert(&category).await?;
        info!(id = %category.id, name = %category.name, "Category created");

        Ok(category)
    }

    /// Gets a category by id.
    pub async fn get_category(&self, id: &str) -> ServiceResult<Category> {
        self.db()
            .categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("category", id))
    }

    /// Lists all categories, oldest first.
    pub async fn list_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.db().categories().list().await?)
    }

    /// Lists the categories of one brand.
    pub async fn list_categories_by_brand(&self, brand_id: &str) -> ServiceResult<Vec<Category>> {
        Ok(self.db().categories().list_by_brand(brand_id).await?)
    }

    /// Deletes a category and, by cascade, its products.
    ///
    /// A missing id is a no-op.
    pub async fn delete_category(&self, id: &str) -> ServiceResult<()> {
        self.db().categories().delete(id).await?;
        info!(id = %id, "Category deleted (with products)");
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Creates a product under an existing brand and category.
    pub async fn add_product(&self, new: NewProduct) -> ServiceResult<Product> {
        let name = validate_name("name", &new.name)?;
        validate_price_cents(new.price_cents)?;
        validate_stock(new.stock)?;

        if self.db().brands().get_by_id(&new.brand_id).await?.is_none() {
            return Err(ValidationError::UnknownReference {
                field: "brandId",
                entity: "brand",
                id: new.brand_id,
            }
            .into());
        }
        if self
            .db()
            .categories()
            .get_by_id(&new.category_id)
            .await?
            .is_none()
        {
            return Err(ValidationError::UnknownReference {
                field: "categoryId",
                entity: "category",
                id: new.category_id,
            }
            .into());
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name,
            brand_id: new.brand_id,
            category_id: new.category_id,
            price_cents: new.price_cents,
            stock: new.stock,
            description: new.description,
            image_url: new.image_url,
            created_at: Utc::now(),
        };

        self.db().products().insert(&product).await?;
        info!(id = %product.id, name = %product.name, stock = product.stock, "Product created");

        Ok(product)
    }

    /// Gets a product by id.
    pub async fn get_product(&self, id: &str) -> ServiceResult<Product> {
        self.db()
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))
    }

    /// Lists all products, oldest first.
    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.db().products().list().await?)
    }

    /// Lists the products of one brand.
    pub async fn list_products_by_brand(&self, brand_id: &str) -> ServiceResult<Vec<Product>> {
        Ok(self.db().products().list_by_brand(brand_id).await?)
    }

    /// Lists the products of one category.
    pub async fn list_products_by_category(
        &self,
        category_id: &str,
    ) -> ServiceResult<Vec<Product>> {
        Ok(self.db().products().list_by_category(category_id).await?)
    }

    /// Applies a partial update to a product.
    ///
    /// Present fields go through the same validation as creation,
    /// including reference checks for a changed brand or category. The
    /// merged row is written in one statement.
    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> ServiceResult<Product> {
        let mut product = self.get_product(id).await?;

        if patch.is_empty() {
            return Ok(product);
        }

        if let Some(name) = patch.name {
            product.name = validate_name("name", &name)?;
        }
        if let Some(price_cents) = patch.price_cents {
            validate_price_cents(price_cents)?;
            product.price_cents = price_cents;
        }
        if let Some(stock) = patch.stock {
            validate_stock(stock)?;
            product.stock = stock;
        }
        if let Some(brand_id) = patch.brand_id {
            if self.db().brands().get_by_id(&brand_id).await?.is_none() {
                return Err(ValidationError::UnknownReference {
                    field: "brandId",
                    entity: "brand",
                    id: brand_id,
                }
                .into());
            }
            product.brand_id = brand_id;
        }
        if let Some(category_id) = patch.category_id {
            if self
                .db()
                .categories()
                .get_by_id(&category_id)
                .await?
                .is_none()
            {
                return Err(ValidationError::UnknownReference {
                    field: "categoryId",
                    entity: "category",
                    id: category_id,
                }
                .into());
            }
            product.category_id = category_id;
        }
        if patch.description.is_some() {
            product.description = patch.description;
        }
        if patch.image_url.is_some() {
            product.image_url = patch.image_url;
        }

        self.db().products().update(&product).await?;
        info!(id = %product.id, "Product updated");

        Ok(product)
    }

    /// Deletes a single product.
    ///
    /// A missing id is a no-op. Outstanding orders keep their item
    /// snapshots; a later delivery simply skips the vanished product.
    pub async fn delete_product(&self, id: &str) -> ServiceResult<()> {
        self.db().products().delete(id).await?;
        info!(id = %id, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Snapshot Name Resolution
    // =========================================================================

    /// Brand display name, or "Unknown" when the reference dangles.
    pub(crate) async fn brand_display_name(&self, brand_id: &str) -> ServiceResult<String> {
        Ok(self
            .db()
            .brands()
            .get_by_id(brand_id)
            .await?
            .map(|b| b.name)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()))
    }

    /// Category display name, or "Unknown" when the reference dangles.
    pub(crate) async fn category_display_name(&self, category_id: &str) -> ServiceResult<String> {
        Ok(self
            .db()
            .categories()
            .get_by_id(category_id)
            .await?
            .map(|c| c.name)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
