//! # Menu Commands
//!
//! Read-only browsing of the weekly menu.

use serde::Serialize;
use tracing::{debug, warn};

use menu_core::{CatalogSource, MenuProduct, OptionGroup};
use menu_db::Database;

use crate::error::ApiError;
use crate::state::StorefrontConfig;

/// Default number of products listed.
const DEFAULT_MENU_LIMIT: u32 = 100;

/// Product data sent to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub promotional_price_cents: Option<i64>,

    /// What one unit costs before options.
    pub base_price_cents: i64,
}

impl From<MenuProduct> for ProductDto {
    fn from(p: MenuProduct) -> Self {
        let base_price_cents = p.base_unit_price().cents();
        ProductDto {
            id: p.id,
            name: p.name,
            description: p.description,
            price_cents: p.price_cents,
            promotional_price_cents: p.promotional_price_cents,
            base_price_cents,
        }
    }
}

/// A product with its option groups, both in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOptionsResponse {
    pub product: ProductDto,
    pub groups: Vec<OptionGroup>,
}

/// Lists the tenant's active products.
pub async fn list_menu(
    db: &Database,
    config: &StorefrontConfig,
    limit: Option<u32>,
) -> Result<Vec<ProductDto>, ApiError> {
    let limit = limit.unwrap_or(DEFAULT_MENU_LIMIT);
    debug!(tenant_id = %config.tenant_id, limit = %limit, "list_menu command");

    let products = db.products().list_active(&config.tenant_id, limit).await?;
    Ok(products.into_iter().map(ProductDto::from).collect())
}

/// Returns a product and the option groups the tenant's tier offers.
pub async fn get_product_options(
    db: &Database,
    config: &StorefrontConfig,
    product_id: String,
) -> Result<ProductOptionsResponse, ApiError> {
    debug!(product_id = %product_id, "get_product_options command");

    let product = load_tenant_product(db, config, &product_id).await?;

    let groups = if config.access_level.can_configure_options() {
        let catalog = db.load_catalog(&product.id).await?;
        display_groups(catalog.groups_in_display_order())
    } else {
        Vec::new()
    };

    Ok(ProductOptionsResponse {
        product: ProductDto::from(product),
        groups,
    })
}

/// Loads a product of the configured tenant.
///
/// Products of other tenants are reported as not found.
pub(crate) async fn load_tenant_product(
    db: &Database,
    config: &StorefrontConfig,
    product_id: &str,
) -> Result<MenuProduct, ApiError> {
    let product = db
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    if product.tenant_id != config.tenant_id {
        warn!(
            product_id = %product_id,
            tenant_id = %config.tenant_id,
            owner = %product.tenant_id,
            "Product requested outside the configured tenant"
        );
        return Err(ApiError::not_found("Product", product_id));
    }

    Ok(product)
}

/// Copies groups sorted for display, with their options sorted too.
pub(crate) fn display_groups(groups: Vec<&OptionGroup>) -> Vec<OptionGroup> {
    groups
        .into_iter()
        .map(|group| {
            let mut group = group.clone();
            group.options.sort_by_key(|o| o.display_order);
            group
        })
        .collect()
}
