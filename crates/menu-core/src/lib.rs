//! # menu-core: Option Selection & Pricing Engine
//!
//! Pure business logic for configurable menu products: which options a
//! customer picked, whether that is allowed, and what it costs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Menu Storefront Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               apps/storefront (sessions, cart)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ menu-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │  catalog  │─►│ selection │─►│  pricing  │─►│configurator│  │   │
//! │  │   │  groups   │  │  select   │  │ validate  │  │  commit    │  │   │
//! │  │   │  options  │  │ deselect  │  │  total    │  │  LineItem  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            menu-db (SQLite catalog source)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Option groups and options for one product
//! - [`selection`] - Select / deselect / clear transitions
//! - [`pricing`] - Commit-time validation, price and description
//! - [`configurator`] - Commit protocol and collaborator traits
//! - [`types`] - Menu products
//! - [`access`] - Tenant access level resolution
//! - [`money`] - Integer money
//! - [`validation`] - Input validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use menu_core::catalog::{Catalog, OptionGroup, OptionItem};
//! use menu_core::money::Money;
//! use menu_core::pricing::{compute_total_price, validate};
//! use menu_core::selection::Selection;
//!
//! let catalog = Catalog::new(vec![OptionGroup::new("size", "Size")
//!     .min_selections(1)
//!     .max_selections(1)
//!     .required(true)
//!     .option(OptionItem::new("m", "M", Money::from_cents(300)))])
//! .unwrap();
//!
//! let selection = Selection::new().select(&catalog, "size", "m").unwrap().selection;
//! assert!(validate(&catalog, &selection).is_empty());
//!
//! let total = compute_total_price(Money::from_cents(1000), &selection, 1);
//! assert_eq!(total.cents(), 1300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod catalog;
pub mod configurator;
pub mod error;
pub mod money;
pub mod pricing;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::AccessLevel;
pub use catalog::{Catalog, OptionGroup, OptionItem, SelectionMode};
pub use configurator::{CartSink, CatalogSource, LineItem, ProductConfigurator};
pub use error::{
    CatalogError, CommitError, CoreError, CoreResult, DataUnavailableError, ValidationError,
};
pub use money::Money;
pub use pricing::Violation;
pub use selection::{SelectOutcome, SelectedOption, Selection};
pub use types::MenuProduct;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tenant ID for single-restaurant deployments.
pub const DEFAULT_TENANT_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Maximum line items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-ordering (typing 100 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Largest list price or option delta accepted, in cents (1,000,000.00).
///
/// Keeps `MAX_ITEM_QUANTITY × (price + Σ deltas)` far inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
