//! # Product Repository
//!
//! Database operations for menu products.
//!
//! Products are soft-deleted (`is_active = 0`) so historical orders keep
//! pointing at a real row.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use menu_core::validation::validate_price;
use menu_core::{Money, MenuProduct};

use crate::error::{DbError, DbResult};

const PRODUCT_COLUMNS: &str = r#"
    id,
    tenant_id,
    name,
    description,
    price_cents,
    promotional_price_cents,
    is_active,
    created_at,
    updated_at
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
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
    ///
    /// ## Returns
    /// * `Ok(Some(MenuProduct))` - Product found (active or not)
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuProduct>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);

        let product = sqlx::query_as::<_, MenuProduct>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Lists a tenant's active products, sorted by name.
    pub async fn list_active(&self, tenant_id: &str, limit: u32) -> DbResult<Vec<MenuProduct>> {
        debug!(tenant_id = %tenant_id, limit = %limit, "Listing active products");

        let sql = format!(
            "SELECT {} FROM products WHERE tenant_id = ?1 AND is_active = 1 ORDER BY name LIMIT ?2",
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, MenuProduct>(&sql)
            .bind(tenant_id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Inserts a new product.
    ///
    /// The product is validated first; an invalid product never reaches SQL.
    pub async fn insert(&self, product: &MenuProduct) -> DbResult<MenuProduct> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        product.validate()?;

        sqlx::query(
            r#"
            INSERT INTO products (
                id, tenant_id, name, description,
                price_cents, promotional_price_cents,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&product.id)
        .bind(&product.tenant_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(product.promotional_price_cents)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(product.clone())
    }

    /// Updates the list price and the promotional price.
    ///
    /// Passing `None` for the promotion ends it.
    pub async fn update_prices(
        &self,
        id: &str,
        price: Money,
        promotional_price: Option<Money>,
    ) -> DbResult<()> {
        debug!(id = %id, price = %price, "Updating product prices");

        validate_price("price", price)?;
        if let Some(promo) = promotional_price {
            validate_price("promotional price", promo)?;
        }

        let result = sqlx::query(
            r#"
            UPDATE products SET
                price_cents = ?2,
                promotional_price_cents = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price.cents())
        .bind(promotional_price.map(|p| p.cents()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Soft-deletes a product by setting is_active = false.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let result = sqlx::query("UPDATE products SET is_active = 0, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new entity ID (products, option groups, options).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use menu_core::DEFAULT_TENANT_ID;

    pub(crate) fn new_product(name: &str, price_cents: i64) -> MenuProduct {
        MenuProduct {
            id: generate_id(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            name: name.to_string(),
            description: None,
            price_cents,
            promotional_price_cents: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = new_product("Burger", 1000);

        db.products().insert(&product).await.unwrap();
        let loaded = db.products().get_by_id(&product.id).await.unwrap().unwrap();

        assert_eq!(loaded.name, "Burger");
        assert_eq!(loaded.price_cents, 1000);
        assert!(loaded.is_active);
        assert!(db.products().get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let result = db.products().insert(&new_product("", 1000)).await;

        assert!(matches!(result, Err(DbError::InvalidData(_))));
    }

    #[tokio::test]
    async fn test_update_prices_and_soft_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        let product = new_product("Pizza", 3000);
        repo.insert(&product).await.unwrap();

        repo.update_prices(&product.id, Money::from_cents(3200), Some(Money::from_cents(2500)))
            .await
            .unwrap();
        let loaded = repo.get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(loaded.base_unit_price().cents(), 2500);

        repo.soft_delete(&product.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo
            .list_active(DEFAULT_TENANT_ID, 10)
            .await
            .unwrap()
            .is_empty());

        assert!(matches!(
            repo.soft_delete("missing").await,
            Err(DbError::NotFound { .. })
        ));
    }
}
