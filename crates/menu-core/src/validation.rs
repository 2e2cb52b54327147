//! # Validation Module
//!
//! Input validation utilities for catalog data and commit parameters.
//!
//! These are *input* checks (malformed data, out-of-range quantity). The
//! commit-time selection rules (required / min / max per group) live in
//! [`crate::pricing::validate`] and return violations as data instead.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Catalog load (Catalog::new)                                  │
//! │  ├── ids and names present, prices non-negative                        │
//! │  └── min_selections <= max_selections                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Selection rules (pricing::validate)                          │
//! │  └── required / min / max per group, accumulated                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Commit (ProductConfigurator::commit)                         │
//! │  └── quantity in 1..=MAX_ITEM_QUANTITY                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_IDENTIFIER_LEN: usize = 64;
const MAX_NAME_LEN: usize = 120;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an opaque identifier (group id, option id, product id).
///
/// ```rust
/// use menu_core::validation::validate_identifier;
///
/// assert!(validate_identifier("group id", "size").is_ok());
/// assert!(validate_identifier("group id", "  ").is_err());
/// ```
pub fn validate_identifier(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }

    Ok(())
}

/// Validates a display label (group name, option name, product name).
pub fn validate_display_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a menu price or option delta.
///
/// Zero is allowed (free toppings, "no sauce"). The upper bound is
/// [`MAX_PRICE_CENTS`].
///
/// ```rust
/// use menu_core::money::Money;
/// use menu_core::validation::validate_price;
///
/// assert!(validate_price("price", Money::from_cents(0)).is_ok());
/// assert!(validate_price("price", Money::from_cents(-100)).is_err());
/// assert!(validate_price("price", Money::from_cents(i64::MAX)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a group's selection bounds.
///
/// A `max` of 0 means unlimited, so any `min` is consistent with it.
pub fn validate_selection_bounds(group: &str, min: u32, max: u32) -> ValidationResult<()> {
    if max > 0 && min > max {
        return Err(ValidationError::InconsistentBounds {
            group: group.to_string(),
            min,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string (session ids, database ids).
///
/// ```rust
/// use menu_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("id", "size").is_ok());
        assert!(validate_identifier("id", "").is_err());
        assert!(validate_identifier("id", &"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_display_name() {
        assert!(validate_display_name("name", "Toppings").is_ok());
        assert!(validate_display_name("name", "   ").is_err());
        assert!(validate_display_name("name", &"A".repeat(121)).is_err());
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price("price", Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert_eq!(
            validate_price("additional price", Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange {
                field: "additional price".to_string(),
                min: 0,
                max: MAX_PRICE_CENTS,
            })
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_selection_bounds() {
        assert!(validate_selection_bounds("Size", 1, 1).is_ok());
        assert!(validate_selection_bounds("Extras", 5, 0).is_ok());
        assert_eq!(
            validate_selection_bounds("Toppings", 3, 2),
            Err(ValidationError::InconsistentBounds {
                group: "Toppings".to_string(),
                min: 3,
                max: 2,
            })
        );
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
