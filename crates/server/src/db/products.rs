//! Product repository for database operations.

use sqlx::PgPool;

use iceshopz_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product, ProductPatch};

/// Columns for a product joined with its category name. Kept as one
/// fragment so every query returns the same shape.
const PRODUCT_SELECT: &str = r"
    SELECT p.id, p.name, p.description, p.price_cents, p.image_url,
           p.stock, p.category_id, c.name AS category_name
    FROM products p
    LEFT JOIN categories c ON c.id = p.category_id
";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products, newest first, with category names joined.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products =
            sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} ORDER BY p.id DESC"))
                .fetch_all(self.pool)
                .await?;

        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!("{PRODUCT_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(product)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the category does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let (id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO products (name, description, price_cents, image_url, stock, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            ",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price_cents)
        .bind(&new.image_url)
        .bind(new.stock)
        .bind(new.category_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_referenced(e, "category does not exist"))?;

        self.get(ProductId::new(id))
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Apply a partial update. Unset patch fields keep their current value
    /// via COALESCE; the statement shape never changes.
    ///
    /// Returns `None` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE products
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                price_cents = COALESCE($3, price_cents),
                image_url = COALESCE($4, image_url),
                stock = COALESCE($5, stock),
                category_id = COALESCE($6, category_id)
            WHERE id = $7
            ",
        )
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.price_cents)
        .bind(patch.image_url.as_deref())
        .bind(patch.stock)
        .bind(patch.category_id)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get(id).await
    }

    /// Delete a product.
    ///
    /// Returns `true` if a row was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the product is referenced by
    /// order items.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                RepositoryError::from_referenced(e, "product is referenced by orders")
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all products. Used by seeding to decide whether to insert
    /// the starter catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
