//! # Domain Types
//!
//! Menu products shared across the workspace.
//!
//! ## Dual-Key Identity Pattern
//! Products carry an immutable `id` (UUID v4, used for relations) and a
//! human-readable `name` that may change between weekly menus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing;
use crate::validation::{validate_display_name, validate_price, validate_uuid, ValidationResult};

// =============================================================================
// Menu Product
// =============================================================================

/// A product on the weekly menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MenuProduct {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Tenant (restaurant) this product belongs to.
    pub tenant_id: String,

    /// Display name, the base of every line item description.
    pub name: String,

    pub description: Option<String>,

    /// List price in cents.
    pub price_cents: i64,

    /// Promotional price in cents; active whenever present.
    pub promotional_price_cents: Option<i64>,

    /// Whether the product can be ordered (soft delete).
    pub is_active: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuProduct {
    /// Returns the list price.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the promotional price, if one is running.
    #[inline]
    pub fn promotional_price(&self) -> Option<Money> {
        self.promotional_price_cents.map(Money::from_cents)
    }

    /// The price option deltas are added to.
    pub fn base_unit_price(&self) -> Money {
        pricing::base_unit_price(self.price(), self.promotional_price())
    }

    /// Validates the product's own fields.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_uuid(&self.id)?;
        validate_display_name("product name", &self.name)?;
        validate_price("price", self.price())?;
        if let Some(promo) = self.promotional_price() {
            validate_price("promotional price", promo)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::DEFAULT_TENANT_ID;

    pub(crate) fn test_product(price_cents: i64, promo: Option<i64>) -> MenuProduct {
        MenuProduct {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            name: "Burger".to_string(),
            description: None,
            price_cents,
            promotional_price_cents: promo,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_base_unit_price_prefers_lower_promotion() {
        assert_eq!(test_product(1000, Some(800)).base_unit_price().cents(), 800);
        assert_eq!(test_product(1000, Some(1200)).base_unit_price().cents(), 1000);
        assert_eq!(test_product(1000, None).base_unit_price().cents(), 1000);
    }

    #[test]
    fn test_validate_product() {
        assert!(test_product(1000, None).validate().is_ok());
        assert!(test_product(-1, None).validate().is_err());
        assert!(test_product(1000, Some(-5)).validate().is_err());
        assert!(test_product(crate::MAX_PRICE_CENTS + 1, None).validate().is_err());

        let mut unnamed = test_product(1000, None);
        unnamed.name = " ".to_string();
        assert!(unnamed.validate().is_err());
    }
}
