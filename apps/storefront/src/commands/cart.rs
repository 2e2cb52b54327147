//! # Cart Commands
//!
//! Cart manipulation after items were committed.
//!
//! Items only enter the cart through `commit_configuration`; there is no
//! direct add command, so every line passed selection validation.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{Cart, CartItem, CartState, CartTotals};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Updates the quantity of a cart line. Quantity 0 removes the line.
pub fn update_cart_item(
    cart: &CartState,
    line_id: String,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, quantity = %quantity, "update_cart_item command");

    let result = cart.with_cart_mut(|c| {
        c.update_quantity(&line_id, quantity)?;
        Ok::<CartResponse, String>(CartResponse::from(&*c))
    });

    result.map_err(ApiError::cart)
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, line_id: String) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, "remove_from_cart command");

    let result = cart.with_cart_mut(|c| {
        c.remove_item(&line_id)?;
        Ok::<CartResponse, String>(CartResponse::from(&*c))
    });

    result.map_err(ApiError::cart)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}
