//! # Product Configurator
//!
//! One "configure this product" interaction: a product, its catalog, the
//! current selection, and the commit protocol that turns them into a cart
//! line item.
//!
//! ## Collaborators
//! ```text
//! ┌──────────────────┐   load_catalog    ┌─────────────────────────┐
//! │  CatalogSource   │──────────────────►│   ProductConfigurator   │
//! │  (menu-db, ...)  │                   │  product + catalog      │
//! └──────────────────┘                   │  + Selection            │
//!                                        └───────────┬─────────────┘
//!                                                    │ commit (valid only)
//!                                                    ▼
//!                                        ┌─────────────────────────┐
//!                                        │  CartSink (storefront)  │
//!                                        └─────────────────────────┘
//! ```
//!
//! Closing the view without committing simply drops the configurator.

use serde::{Deserialize, Serialize};
use std::future::Future;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CatalogResult, CommitError, DataUnavailableError};
use crate::money::Money;
use crate::pricing::{self, Violation};
use crate::selection::{SelectOutcome, SelectedOption, Selection};
use crate::types::MenuProduct;
use crate::validation::validate_quantity;

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Loads a product's option catalog from wherever it is stored.
pub trait CatalogSource: Send + Sync {
    fn load_catalog(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<Catalog, DataUnavailableError>> + Send;
}

/// Receives committed line items. The sole consumer of the engine's output.
pub trait CartSink {
    /// Takes ownership of a priced line item. An `Err` carries a
    /// human-readable reason (cart full, quantity overflow).
    fn accept(&mut self, item: LineItem) -> Result<(), String>;
}

// =============================================================================
// Line Item
// =============================================================================

/// A priced, described product configuration ready for the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub product_id: String,

    /// "Burger (M, Bacon, Cheese)"
    pub description: String,

    /// Base price plus every option delta, for one unit.
    pub unit_price: Money,

    pub quantity: i64,

    /// Picked options in pick order.
    pub selection: Vec<SelectedOption>,
}

impl LineItem {
    /// `quantity × unit_price`.
    pub fn total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Configurator
// =============================================================================

/// Holds one configuration session's state.
#[derive(Debug, Clone)]
pub struct ProductConfigurator {
    product: MenuProduct,
    catalog: Catalog,
    selection: Selection,
}

impl ProductConfigurator {
    /// Starts a configuration with an empty selection.
    pub fn new(product: MenuProduct, catalog: Catalog) -> Self {
        ProductConfigurator {
            product,
            catalog,
            selection: Selection::new(),
        }
    }

    /// Loads the product's catalog from `source`, then starts.
    pub async fn open<S: CatalogSource>(
        source: &S,
        product: MenuProduct,
    ) -> Result<Self, DataUnavailableError> {
        let catalog = source.load_catalog(&product.id).await?;
        Ok(ProductConfigurator::new(product, catalog))
    }

    pub fn product(&self) -> &MenuProduct {
        &self.product
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Picks an option. On error the selection is unchanged.
    pub fn select(&mut self, group_id: &str, option_id: &str) -> CatalogResult<SelectOutcome> {
        let transition = self.selection.select(&self.catalog, group_id, option_id)?;
        self.selection = transition.selection;
        Ok(transition.outcome)
    }

    /// Unpicks an option. Never fails.
    pub fn deselect(&mut self, group_id: &str, option_id: &str) {
        self.selection = self.selection.deselect(group_id, option_id);
    }

    /// Drops every pick.
    pub fn clear(&mut self) {
        self.selection = self.selection.clear();
    }

    /// Rules the current selection breaks; empty means committable.
    pub fn violations(&self) -> Vec<Violation> {
        pricing::validate(&self.catalog, &self.selection)
    }

    /// Validates, then prices and describes the selection.
    ///
    /// ## Order
    /// 1. product must be active
    /// 2. `pricing::validate` must return nothing
    /// 3. quantity must be in range
    /// 4. only then is a price computed; a total that overflows is refused
    pub fn commit(&self, quantity: i64) -> Result<LineItem, CommitError> {
        if !self.product.is_active {
            return Err(CommitError::ProductInactive(self.product.id.clone()));
        }

        let violations = self.violations();
        if !violations.is_empty() {
            return Err(CommitError::Rejected(violations));
        }

        validate_quantity(quantity)?;

        let unit_price = pricing::checked_unit_price(self.product.base_unit_price(), &self.selection)
            .filter(|unit| unit.checked_multiply_quantity(quantity).is_some())
            .ok_or_else(|| CommitError::PriceOverflow(self.product.id.clone()))?;

        Ok(LineItem {
            product_id: self.product.id.clone(),
            description: pricing::build_line_item_description(&self.product.name, &self.selection),
            unit_price,
            quantity,
            selection: self.selection.items().to_vec(),
        })
    }

    /// Commits and hands the line item to `cart`. The cart is never
    /// touched when the commit is refused.
    pub fn commit_into<C: CartSink + ?Sized>(
        &self,
        quantity: i64,
        cart: &mut C,
    ) -> Result<LineItem, CommitError> {
        let item = self.commit(quantity)?;
        cart.accept(item.clone()).map_err(CommitError::Cart)?;
        Ok(item)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::burger_catalog;
    use crate::types::tests::test_product;
    use std::collections::HashMap;

    #[derive(Default)]
    struct RecordingCart {
        items: Vec<LineItem>,
    }

    impl CartSink for RecordingCart {
        fn accept(&mut self, item: LineItem) -> Result<(), String> {
            self.items.push(item);
            Ok(())
        }
    }

    struct FullCart;

    impl CartSink for FullCart {
        fn accept(&mut self, _item: LineItem) -> Result<(), String> {
            Err("Cart cannot have more than 100 items".to_string())
        }
    }

    struct MapSource(HashMap<String, Catalog>);

    impl CatalogSource for MapSource {
        async fn load_catalog(&self, product_id: &str) -> Result<Catalog, DataUnavailableError> {
            self.0
                .get(product_id)
                .cloned()
                .ok_or_else(|| DataUnavailableError::new(product_id, "no such product"))
        }
    }

    fn configured_burger() -> ProductConfigurator {
        let mut c = ProductConfigurator::new(test_product(1000, None), burger_catalog());
        c.select("size", "m").unwrap();
        c.select("toppings", "bacon").unwrap();
        c.select("toppings", "cheese").unwrap();
        c
    }

    #[test]
    fn test_commit_prices_valid_selection() {
        let item = configured_burger().commit(1).unwrap();

        assert_eq!(item.unit_price.cents(), 1650);
        assert_eq!(item.total().cents(), 1650);
        assert_eq!(item.description, "Burger (M, Bacon, Cheese)");
        assert_eq!(item.selection.len(), 3);
    }

    #[test]
    fn test_invalid_selection_never_reaches_cart() {
        let configurator = ProductConfigurator::new(test_product(1000, None), burger_catalog());
        let mut cart = RecordingCart::default();

        let err = configurator.commit_into(1, &mut cart).unwrap_err();
        assert_eq!(err.violations().len(), 2);
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_valid_selection_reaches_cart() {
        let mut cart = RecordingCart::default();
        configured_burger().commit_into(2, &mut cart).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].total().cents(), 3300);
    }

    #[test]
    fn test_cart_refusal_is_reported() {
        let err = configured_burger().commit_into(1, &mut FullCart).unwrap_err();
        assert!(matches!(err, CommitError::Cart(_)));
    }

    #[test]
    fn test_bad_quantity_and_inactive_product() {
        assert!(matches!(
            configured_burger().commit(0),
            Err(CommitError::InvalidQuantity(_))
        ));

        let mut product = test_product(1000, None);
        product.is_active = false;
        let c = ProductConfigurator::new(product, burger_catalog());
        assert!(matches!(c.commit(1), Err(CommitError::ProductInactive(_))));
    }

    #[test]
    fn test_overflowing_total_is_refused() {
        let mut c = ProductConfigurator::new(test_product(i64::MAX - 100, None), burger_catalog());
        c.select("size", "m").unwrap();

        let mut cart = RecordingCart::default();
        let err = c.commit_into(1, &mut cart).unwrap_err();
        assert!(matches!(err, CommitError::PriceOverflow(_)));
        assert!(cart.items.is_empty());

        let mut c = ProductConfigurator::new(test_product(i64::MAX / 2, None), burger_catalog());
        c.select("size", "p").unwrap();
        assert!(c.commit(1).is_ok());
        assert!(matches!(c.commit(3), Err(CommitError::PriceOverflow(_))));
    }

    #[test]
    fn test_failed_select_keeps_selection() {
        let mut c = configured_burger();
        assert!(c.select("size", "xl").is_err());
        assert_eq!(c.selection().len(), 3);

        c.deselect("toppings", "bacon");
        assert_eq!(c.selection().len(), 2);
        c.clear();
        assert!(c.selection().is_empty());
    }

    #[tokio::test]
    async fn test_open_loads_catalog() {
        let product = test_product(1000, Some(900));
        let mut catalogs = HashMap::new();
        catalogs.insert(product.id.clone(), burger_catalog());
        let source = MapSource(catalogs);

        let c = ProductConfigurator::open(&source, product).await.unwrap();
        assert_eq!(c.catalog().len(), 2);

        let mut missing = test_product(1000, None);
        missing.id = "other".to_string();
        assert!(ProductConfigurator::open(&source, missing).await.is_err());
    }
}
