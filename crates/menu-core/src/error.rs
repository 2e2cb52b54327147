//! # Error Types
//!
//! Domain-specific error types for menu-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  menu-core errors (this file)                                          │
//! │  ├── CatalogError          - stale group/option ids, unavailable picks │
//! │  ├── ValidationError       - malformed input (catalog data, quantity)  │
//! │  ├── DataUnavailableError  - catalog source failed to load             │
//! │  ├── CommitError           - add-to-cart refused                       │
//! │  └── CoreError             - umbrella for all of the above             │
//! │                                                                         │
//! │  Violations are NOT errors: `pricing::validate` returns them as data   │
//! │  so every broken rule can be shown at once.                            │
//! │                                                                         │
//! │  menu-db errors (separate crate)                                       │
//! │  └── DbError               - Database operation failures               │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError              - What frontend sees (serialized)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::pricing::{join_violations, Violation};

// =============================================================================
// Catalog Error
// =============================================================================

/// Lookup failures against a loaded catalog.
///
/// These always indicate a stale or forged id, never a user mistake. The
/// storefront treats them as fatal for the configuration session and
/// resets it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No group with this id exists in the catalog.
    #[error("Option group not found: {group_id}")]
    GroupNotFound { group_id: String },

    /// The option does not exist under this group (it may exist under a
    /// different one).
    #[error("Option {option_id} not found in group {group_id}")]
    OptionNotFound { group_id: String, option_id: String },

    /// The option exists but is marked unavailable.
    #[error("Option {option_id} in group {group_id} is not available")]
    OptionUnavailable { group_id: String, option_id: String },
}

impl CatalogError {
    pub fn group_not_found(group_id: impl Into<String>) -> Self {
        CatalogError::GroupNotFound {
            group_id: group_id.into(),
        }
    }

    pub fn option_not_found(group_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        CatalogError::OptionNotFound {
            group_id: group_id.into(),
            option_id: option_id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while loading catalog data or before pricing a commit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two groups sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A group's minimum exceeds its maximum.
    #[error("Option group '{group}' has min_selections {min} above max_selections {max}")]
    InconsistentBounds { group: String, min: u32, max: u32 },
}

// =============================================================================
// Data Unavailable
// =============================================================================

/// The catalog source could not produce a catalog.
///
/// No retry policy lives in the core; backoff is the collaborator's job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Catalog for product {product_id} is unavailable: {reason}")]
pub struct DataUnavailableError {
    pub product_id: String,
    pub reason: String,
}

impl DataUnavailableError {
    pub fn new(product_id: impl Into<String>, reason: impl Into<String>) -> Self {
        DataUnavailableError {
            product_id: product_id.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Commit Error
// =============================================================================

/// Why an add-to-cart commit was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The selection broke one or more group rules. Display joins the
    /// violation messages verbatim.
    #[error("{}", join_violations(.0))]
    Rejected(Vec<Violation>),

    /// Quantity failed validation; nothing was priced.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] ValidationError),

    /// The product can no longer be ordered.
    #[error("Product {0} is not available for ordering")]
    ProductInactive(String),

    /// The line total does not fit in `Money`.
    #[error("Price of product {0} is out of range")]
    PriceOverflow(String),

    /// The cart refused the priced line item.
    #[error("Cart rejected line item: {0}")]
    Cart(String),
}

impl CommitError {
    /// Violations carried by a rejected commit, empty otherwise.
    pub fn violations(&self) -> &[Violation] {
        match self {
            CommitError::Rejected(violations) => violations,
            _ => &[],
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella error for callers that drive the whole engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DataUnavailable(#[from] DataUnavailableError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_messages() {
        let err = CatalogError::option_not_found("size", "xl");
        assert_eq!(err.to_string(), "Option xl not found in group size");

        let err = CatalogError::group_not_found("sauces");
        assert_eq!(err.to_string(), "Option group not found: sauces");
    }

    #[test]
    fn test_rejected_commit_joins_violations() {
        let err = CommitError::Rejected(vec![
            Violation::RequiredMissing {
                group_name: "Size".to_string(),
            },
            Violation::BelowMinimum {
                group_name: "Size".to_string(),
                min: 1,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Select at least one option from 'Size'; 'Size' requires at least 1 selection(s)"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let err: CoreError = CatalogError::group_not_found("size").into();
        assert!(matches!(err, CoreError::Catalog(_)));

        let err: CoreError = DataUnavailableError::new("p1", "timeout").into();
        assert_eq!(
            err.to_string(),
            "Catalog for product p1 is unavailable: timeout"
        );
    }
}
