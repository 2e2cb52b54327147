//! # Cart State
//!
//! Holds committed line items until checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Frontend Action          Command                  Cart State Change    │
//! │  ───────────────          ───────                  ─────────────────    │
//! │                                                                         │
//! │  Add configured item ───► commit_configuration() ► accept(line item)   │
//! │                                                    (merge if same      │
//! │                                                     configuration)     │
//! │  Change Quantity ───────► update_cart_item() ────► items[i].qty = n    │
//! │  Click Remove ──────────► remove_from_cart() ────► items.remove(i)     │
//! │  Click Clear ───────────► clear_cart() ──────────► items.clear()       │
//! │  View Cart ─────────────► get_cart() ────────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the configurator produces line items, so nothing enters the cart
//! without passing selection validation first.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use menu_core::{CartSink, LineItem, Money, SelectedOption, MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// A configured product in the cart.
///
/// Price and description are frozen at commit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Identifies this cart line (one product can appear on several lines
    /// with different options).
    pub line_id: String,

    pub product_id: String,

    /// "Burger (M, Bacon, Cheese)"
    pub description: String,

    /// Base price plus option deltas, in cents.
    pub unit_price_cents: i64,

    pub quantity: i64,

    pub selection: Vec<SelectedOption>,

    pub added_at: DateTime<Utc>,
}

impl CartItem {
    fn from_line_item(item: LineItem) -> Self {
        CartItem {
            line_id: Uuid::new_v4().to_string(),
            product_id: item.product_id,
            description: item.description,
            unit_price_cents: item.unit_price.cents(),
            quantity: item.quantity,
            selection: item.selection,
            added_at: Utc::now(),
        }
    }

    /// Same product with the same picks in the same order.
    fn same_configuration(&self, item: &LineItem) -> bool {
        self.product_id == item.product_id
            && self.unit_price_cents == item.unit_price.cents()
            && self.selection == item.selection
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        Money::from_cents(self.unit_price_cents)
            .multiply_quantity(self.quantity)
            .cents()
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Identical configurations share one line (quantities add up)
/// - Quantity per line is within `1..=MAX_ITEM_QUANTITY`
/// - At most `MAX_CART_ITEMS` lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,

    /// When the cart was created/last cleared
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a committed line item, merging it into an identical line.
    ///
    /// ## Returns
    /// The `line_id` the item landed on.
    pub fn add_line(&mut self, item: LineItem) -> Result<String, String> {
        if let Some(line) = self.items.iter_mut().find(|l| l.same_configuration(&item)) {
            let new_qty = line.quantity + item.quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(format!(
                    "Quantity would exceed maximum of {}",
                    MAX_ITEM_QUANTITY
                ));
            }
            line.quantity = new_qty;
            return Ok(line.line_id.clone());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(format!("Cart cannot have more than {} items", MAX_CART_ITEMS));
        }

        let line = CartItem::from_line_item(item);
        let line_id = line.line_id.clone();
        self.items.push(line);
        Ok(line_id)
    }

    /// Updates the quantity of a line. Quantity 0 removes it.
    pub fn update_quantity(&mut self, line_id: &str, quantity: i64) -> Result<(), String> {
        if quantity == 0 {
            return self.remove_item(line_id);
        }

        if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
            return Err(format!(
                "Quantity must be between 1 and {}",
                MAX_ITEM_QUANTITY
            ));
        }

        match self.items.iter_mut().find(|l| l.line_id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(())
            }
            None => Err(format!("Line {} not in cart", line_id)),
        }
    }

    /// Removes a line from the cart.
    pub fn remove_item(&mut self, line_id: &str) -> Result<(), String> {
        let initial_len = self.items.len();
        self.items.retain(|l| l.line_id != line_id);

        if self.items.len() == initial_len {
            Err(format!("Line {} not in cart", line_id))
        } else {
            Ok(())
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Sum of every line total.
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(|l| l.line_total_cents()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl CartSink for Cart {
    fn accept(&mut self, item: LineItem) -> Result<(), String> {
        self.add_line(item).map(|_| ())
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total_cents: cart.total_cents(),
        }
    }
}

/// Shared cart state.
///
/// `Arc<Mutex<Cart>>`: commands may run concurrently, and only one of them
/// should modify the cart at a time.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| CartTotals::from(cart));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, unit_cents: i64, quantity: i64, picks: &[&str]) -> LineItem {
        LineItem {
            product_id: product_id.to_string(),
            description: format!("Product {}", product_id),
            unit_price: Money::from_cents(unit_cents),
            quantity,
            selection: picks
                .iter()
                .map(|id| SelectedOption {
                    group_id: "toppings".to_string(),
                    option_id: id.to_string(),
                    name: id.to_string(),
                    additional_price: Money::zero(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_identical_configurations_merge() {
        let mut cart = Cart::new();

        let first = cart.add_line(line("burger", 1650, 1, &["bacon"])).unwrap();
        let second = cart.add_line(line("burger", 1650, 2, &["bacon"])).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_cents(), 4950);
    }

    #[test]
    fn test_different_options_get_separate_lines() {
        let mut cart = Cart::new();

        cart.add_line(line("burger", 1200, 1, &["bacon"])).unwrap();
        cart.add_line(line("burger", 1150, 1, &["cheese"])).unwrap();

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_cents(), 2350);
    }

    #[test]
    fn test_update_and_remove() {
        let mut cart = Cart::new();
        let id = cart.add_line(line("soda", 450, 1, &[])).unwrap();

        cart.update_quantity(&id, 4).unwrap();
        assert_eq!(cart.total_cents(), 1800);

        assert!(cart.update_quantity(&id, MAX_ITEM_QUANTITY + 1).is_err());
        assert!(cart.update_quantity("missing", 1).is_err());

        cart.update_quantity(&id, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merge_respects_quantity_cap() {
        let mut cart = Cart::new();
        cart.add_line(line("soda", 450, MAX_ITEM_QUANTITY, &[])).unwrap();

        assert!(cart.accept(line("soda", 450, 1, &[])).is_err());
        assert_eq!(cart.total_quantity(), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_state_shares_cart() {
        let state = CartState::new();
        let clone = state.clone();

        clone.with_cart_mut(|c| c.add_line(line("soda", 450, 1, &[]))).unwrap();

        assert_eq!(state.with_cart(|c| c.item_count()), 1);
        state.with_cart_mut(|c| c.clear());
        assert!(clone.with_cart(|c| c.is_empty()));
    }
}
