//! # Option Group Repository
//!
//! Stores the option catalog of each product and rebuilds it as a
//! [`Catalog`] when a configuration opens.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──1:N──► option_groups ──1:N──► option_items                 │
//! │                    (min/max/required)     (delta, availability)         │
//! │                    key (product, group)   key (product, group, option)  │
//! │                                                                         │
//! │  fetch_catalog(product_id)                                             │
//! │       │  1. product must exist                                         │
//! │       │  2. groups ORDER BY display_order, rowid                       │
//! │       │  3. options ORDER BY display_order, rowid                      │
//! │       ▼                                                                 │
//! │  Catalog::new(groups) ← same checks as a hand-built catalog            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Group ids only need to be unique within a product and option ids within
//! a group, so every write below is scoped by the owning product.
//!
//! Deleting a product row cascades to its groups and options.

use sqlx::{FromRow, SqlitePool};
use std::collections::HashMap;
use tracing::{debug, warn};

use menu_core::validation::{validate_display_name, validate_identifier, validate_price};
use menu_core::{Catalog, CatalogSource, DataUnavailableError, Money, OptionGroup, OptionItem};

use crate::error::{DbError, DbResult};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, FromRow)]
struct GroupRow {
    id: String,
    name: String,
    min_selections: i64,
    max_selections: i64,
    is_required: bool,
    display_order: i64,
}

#[derive(Debug, FromRow)]
struct ItemRow {
    id: String,
    group_id: String,
    name: String,
    additional_price_cents: i64,
    is_available: bool,
    display_order: i64,
}

fn to_u32(field: &str, value: i64) -> DbResult<u32> {
    u32::try_from(value).map_err(|_| DbError::InvalidData(format!("{} out of range: {}", field, value)))
}

fn to_i32(field: &str, value: i64) -> DbResult<i32> {
    i32::try_from(value).map_err(|_| DbError::InvalidData(format!("{} out of range: {}", field, value)))
}

impl ItemRow {
    fn into_option(self) -> DbResult<OptionItem> {
        let mut option = OptionItem::new(self.id, self.name, Money::from_cents(self.additional_price_cents))
            .display_order(to_i32("display_order", self.display_order)?);
        option.available = self.is_available;
        Ok(option)
    }
}

impl GroupRow {
    fn into_group(self, options: Vec<OptionItem>) -> DbResult<OptionGroup> {
        let mut group = OptionGroup::new(self.id, self.name)
            .min_selections(to_u32("min_selections", self.min_selections)?)
            .max_selections(to_u32("max_selections", self.max_selections)?)
            .required(self.is_required)
            .display_order(to_i32("display_order", self.display_order)?);
        group.options = options;
        Ok(group)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for option groups and their options.
#[derive(Debug, Clone)]
pub struct OptionGroupRepository {
    pool: SqlitePool,
}

impl OptionGroupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OptionGroupRepository { pool }
    }

    /// Inserts a group together with all of its options.
    ///
    /// Runs in one transaction: either the whole group lands or nothing does.
    pub async fn insert_group(&self, product_id: &str, group: &OptionGroup) -> DbResult<()> {
        debug!(
            product_id = %product_id,
            group_id = %group.id,
            options = group.options.len(),
            "Inserting option group"
        );

        group.validate()?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO option_groups (
                id, product_id, name,
                min_selections, max_selections, is_required, display_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&group.id)
        .bind(product_id)
        .bind(&group.name)
        .bind(i64::from(group.min_selections))
        .bind(i64::from(group.max_selections))
        .bind(group.required)
        .bind(group.display_order)
        .execute(&mut *tx)
        .await?;

        for option in &group.options {
            sqlx::query(
                r#"
                INSERT INTO option_items (
                    id, product_id, group_id, name,
                    additional_price_cents, is_available, display_order
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&option.id)
            .bind(product_id)
            .bind(&group.id)
            .bind(&option.name)
            .bind(option.additional_price.cents())
            .bind(option.available)
            .bind(option.display_order)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Adds one option to an existing group of a product.
    pub async fn insert_option(
        &self,
        product_id: &str,
        group_id: &str,
        option: &OptionItem,
    ) -> DbResult<()> {
        debug!(
            product_id = %product_id,
            group_id = %group_id,
            option_id = %option.id,
            "Inserting option"
        );

        validate_identifier("option id", &option.id)?;
        validate_display_name("option name", &option.name)?;
        validate_price("additional price", option.additional_price)?;

        sqlx::query(
            r#"
            INSERT INTO option_items (
                id, product_id, group_id, name,
                additional_price_cents, is_available, display_order
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&option.id)
        .bind(product_id)
        .bind(group_id)
        .bind(&option.name)
        .bind(option.additional_price.cents())
        .bind(option.available)
        .bind(option.display_order)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists a product's groups with their options, in catalog order.
    ///
    /// Returns an empty list for unknown products; see [`Self::fetch_catalog`]
    /// for the checked variant.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<OptionGroup>> {
        let group_rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, name, min_selections, max_selections, is_required, display_order
            FROM option_groups
            WHERE product_id = ?1
            ORDER BY display_order, rowid
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let item_rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, group_id, name, additional_price_cents, is_available, display_order
            FROM option_items
            WHERE product_id = ?1
            ORDER BY display_order, rowid
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        let mut options_by_group: HashMap<String, Vec<OptionItem>> = HashMap::new();
        for row in item_rows {
            let group_id = row.group_id.clone();
            options_by_group
                .entry(group_id)
                .or_default()
                .push(row.into_option()?);
        }

        group_rows
            .into_iter()
            .map(|row| {
                let options = options_by_group.remove(&row.id).unwrap_or_default();
                row.into_group(options)
            })
            .collect()
    }

    /// Loads the validated catalog of an existing product.
    ///
    /// ## Returns
    /// * `Ok(Catalog)` - possibly empty for products without options
    /// * `Err(DbError::NotFound)` - the product does not exist
    /// * `Err(DbError::InvalidData)` - stored rows violate catalog rules
    pub async fn fetch_catalog(&self, product_id: &str) -> DbResult<Catalog> {
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;

        if exists == 0 {
            return Err(DbError::not_found("Product", product_id));
        }

        let groups = self.list_for_product(product_id).await?;
        debug!(product_id = %product_id, groups = groups.len(), "Catalog loaded");

        Ok(Catalog::new(groups)?)
    }

    /// Marks an option sold out (or back in stock).
    pub async fn set_option_availability(
        &self,
        product_id: &str,
        group_id: &str,
        option_id: &str,
        available: bool,
    ) -> DbResult<()> {
        debug!(
            product_id = %product_id,
            group_id = %group_id,
            option_id = %option_id,
            available,
            "Updating option availability"
        );

        let result = sqlx::query(
            r#"
            UPDATE option_items SET is_available = ?4
            WHERE product_id = ?1 AND group_id = ?2 AND id = ?3
            "#,
        )
        .bind(product_id)
        .bind(group_id)
        .bind(option_id)
        .bind(available)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Option", option_id));
        }

        Ok(())
    }

    /// Changes a group's selection rules.
    pub async fn update_group_rules(
        &self,
        product_id: &str,
        group_id: &str,
        min_selections: u32,
        max_selections: u32,
        required: bool,
    ) -> DbResult<()> {
        menu_core::validation::validate_selection_bounds(group_id, min_selections, max_selections)?;

        let result = sqlx::query(
            r#"
            UPDATE option_groups SET
                min_selections = ?3,
                max_selections = ?4,
                is_required = ?5
            WHERE product_id = ?1 AND id = ?2
            "#,
        )
        .bind(product_id)
        .bind(group_id)
        .bind(i64::from(min_selections))
        .bind(i64::from(max_selections))
        .bind(required)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Option group", group_id));
        }

        Ok(())
    }

    /// Deletes a group and, through the cascade, its options.
    pub async fn delete_group(&self, product_id: &str, group_id: &str) -> DbResult<()> {
        debug!(product_id = %product_id, group_id = %group_id, "Deleting option group");

        let result = sqlx::query("DELETE FROM option_groups WHERE product_id = ?1 AND id = ?2")
            .bind(product_id)
            .bind(group_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Option group", group_id));
        }

        Ok(())
    }
}

impl CatalogSource for OptionGroupRepository {
    async fn load_catalog(&self, product_id: &str) -> Result<Catalog, DataUnavailableError> {
        self.fetch_catalog(product_id).await.map_err(|err| {
            warn!(product_id = %product_id, error = %err, "Catalog unavailable");
            DataUnavailableError::new(product_id, err.to_string())
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::tests::new_product;

    fn size_group() -> OptionGroup {
        OptionGroup::new("size-1", "Size")
            .min_selections(1)
            .max_selections(1)
            .required(true)
            .option(OptionItem::new("size-1-p", "P", Money::zero()))
            .option(OptionItem::new("size-1-m", "M", Money::from_cents(300)))
            .option(OptionItem::new("size-1-g", "G", Money::from_cents(600)))
    }

    fn toppings_group() -> OptionGroup {
        OptionGroup::new("toppings-1", "Toppings")
            .max_selections(2)
            .display_order(1)
            .option(OptionItem::new("top-bacon", "Bacon", Money::from_cents(200)))
            .option(OptionItem::new("top-cheese", "Cheese", Money::from_cents(150)))
    }

    async fn seeded() -> (Database, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = new_product("Burger", 1000);
        db.products().insert(&product).await.unwrap();

        let repo = db.option_groups();
        repo.insert_group(&product.id, &size_group()).await.unwrap();
        repo.insert_group(&product.id, &toppings_group()).await.unwrap();

        (db, product.id)
    }

    #[tokio::test]
    async fn test_fetch_catalog_round_trips_rules() {
        let (db, product_id) = seeded().await;
        let catalog = db.option_groups().fetch_catalog(&product_id).await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.groups()[0], size_group());
        assert_eq!(catalog.groups()[1], toppings_group());
        assert_eq!(
            catalog.get_option("size-1", "size-1-m").unwrap().additional_price.cents(),
            300
        );
    }

    #[tokio::test]
    async fn test_fetch_catalog_unknown_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(matches!(
            db.option_groups().fetch_catalog("missing").await,
            Err(DbError::NotFound { .. })
        ));
        assert!(db.option_groups().load_catalog("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_product_without_groups_has_empty_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = new_product("Soda", 500);
        db.products().insert(&product).await.unwrap();

        let catalog = db.load_catalog(&product.id).await.unwrap();
        assert!(catalog.is_empty());
    }

    #[tokio::test]
    async fn test_availability_and_rules_updates() {
        let (db, product_id) = seeded().await;
        let repo = db.option_groups();

        repo.set_option_availability(&product_id, "toppings-1", "top-bacon", false)
            .await
            .unwrap();
        repo.update_group_rules(&product_id, "toppings-1", 1, 3, false)
            .await
            .unwrap();

        let catalog = repo.fetch_catalog(&product_id).await.unwrap();
        assert!(!catalog.get_option("toppings-1", "top-bacon").unwrap().available);
        let toppings = catalog.get_group("toppings-1").unwrap();
        assert_eq!((toppings.min_selections, toppings.max_selections), (1, 3));

        assert!(matches!(
            repo.update_group_rules(&product_id, "toppings-1", 3, 2, false).await,
            Err(DbError::InvalidData(_))
        ));
        assert!(matches!(
            repo.set_option_availability(&product_id, "toppings-1", "missing", true).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_insert_option_and_delete_group() {
        let (db, product_id) = seeded().await;
        let repo = db.option_groups();

        repo.insert_option(
            &product_id,
            "toppings-1",
            &OptionItem::new("top-egg", "Egg", Money::from_cents(200)),
        )
        .await
        .unwrap();
        let groups = repo.list_for_product(&product_id).await.unwrap();
        assert_eq!(groups[1].options.len(), 3);

        repo.delete_group(&product_id, "toppings-1").await.unwrap();
        let groups = repo.list_for_product(&product_id).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "size-1");
    }

    #[tokio::test]
    async fn test_insert_group_for_missing_product_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let result = db.option_groups().insert_group("missing", &size_group()).await;

        assert!(matches!(result, Err(DbError::ForeignKeyViolation { .. })));
        assert!(db.option_groups().list_for_product("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_option_ids_are_scoped_to_their_group() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = new_product("Combo", 2500);
        db.products().insert(&product).await.unwrap();

        let repo = db.option_groups();
        let sauce = OptionGroup::new("sauce", "Sauce")
            .max_selections(1)
            .option(OptionItem::new("none", "No sauce", Money::zero()))
            .option(OptionItem::new("bbq", "BBQ", Money::from_cents(100)));
        let drink = OptionGroup::new("drink", "Drink")
            .max_selections(1)
            .display_order(1)
            .option(OptionItem::new("none", "No drink", Money::zero()))
            .option(OptionItem::new("cola", "Cola", Money::from_cents(500)));
        repo.insert_group(&product.id, &sauce).await.unwrap();
        repo.insert_group(&product.id, &drink).await.unwrap();

        repo.set_option_availability(&product.id, "drink", "none", false)
            .await
            .unwrap();

        let catalog = db.load_catalog(&product.id).await.unwrap();
        assert_eq!(catalog.get_option("sauce", "none").unwrap().name, "No sauce");
        assert!(catalog.get_option("sauce", "none").unwrap().available);
        assert_eq!(catalog.get_option("drink", "none").unwrap().name, "No drink");
        assert!(!catalog.get_option("drink", "none").unwrap().available);
    }

    #[tokio::test]
    async fn test_group_ids_are_scoped_to_their_product() {
        let (db, burger_id) = seeded().await;
        let pizza = new_product("Pizza", 3000);
        db.products().insert(&pizza).await.unwrap();

        let repo = db.option_groups();
        let pizza_size = OptionGroup::new("size-1", "Size")
            .max_selections(1)
            .option(OptionItem::new("size-1-m", "Medium", Money::from_cents(1000)));
        repo.insert_group(&pizza.id, &pizza_size).await.unwrap();

        repo.update_group_rules(&pizza.id, "size-1", 1, 1, true)
            .await
            .unwrap();
        repo.delete_group(&burger_id, "size-1").await.unwrap();

        let pizza_catalog = repo.fetch_catalog(&pizza.id).await.unwrap();
        let size = pizza_catalog.get_group("size-1").unwrap();
        assert!(size.required);
        assert_eq!(size.options[0].additional_price.cents(), 1000);

        let burger_catalog = repo.fetch_catalog(&burger_id).await.unwrap();
        assert!(burger_catalog.get_group("size-1").is_err());
        assert_eq!(burger_catalog.len(), 1);

        assert!(matches!(
            repo.insert_group(&pizza.id, &pizza_size).await,
            Err(DbError::UniqueViolation { .. })
        ));
    }
}
