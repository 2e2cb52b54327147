//! # Option Catalog
//!
//! The immutable list of option groups and options for one product.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product "Burger"                                                       │
//! │  └── Catalog                                                            │
//! │      ├── OptionGroup "Size"      min 1, max 1, required                │
//! │      │   ├── P   +0.00                                                  │
//! │      │   ├── M   +3.00                                                  │
//! │      │   └── G   +6.00                                                  │
//! │      └── OptionGroup "Toppings"  min 0, max 2                          │
//! │          ├── Bacon   +2.00                                              │
//! │          ├── Cheese  +1.50                                              │
//! │          └── Egg     +2.00                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An option belongs to exactly one group. Membership is fixed when the
//! catalog is built and only re-checked by [`Catalog::get_option`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::{CatalogError, CatalogResult, ValidationError};
use crate::money::Money;
use crate::validation::{
    validate_display_name, validate_identifier, validate_price, validate_selection_bounds,
    ValidationResult,
};

// =============================================================================
// Option Item
// =============================================================================

/// One selectable choice inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionItem {
    /// Unique within the owning group.
    pub id: String,

    /// Display label, also used in the line item description.
    pub name: String,

    /// Added to the base price when selected. Never negative.
    pub additional_price: Money,

    /// Unavailable options can never enter a selection.
    pub available: bool,

    /// Presentation only.
    pub display_order: i32,
}

impl OptionItem {
    /// Creates an available option.
    pub fn new(id: impl Into<String>, name: impl Into<String>, additional_price: Money) -> Self {
        OptionItem {
            id: id.into(),
            name: name.into(),
            additional_price,
            available: true,
            display_order: 0,
        }
    }

    /// Marks the option as unavailable (sold out, seasonal).
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    pub fn display_order(mut self, order: i32) -> Self {
        self.display_order = order;
        self
    }
}

// =============================================================================
// Selection Mode
// =============================================================================

/// How a group reacts to a new pick, derived from `max_selections`.
///
/// | max_selections | mode        | behavior on select                   |
/// |----------------|-------------|--------------------------------------|
/// | 0              | `Unlimited` | append                               |
/// | 1              | `Exclusive` | replace the previous pick (radio)    |
/// | n > 1          | `Capped(n)` | append until n, then ignore          |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Exclusive,
    Capped(u32),
    Unlimited,
}

// =============================================================================
// Option Group
// =============================================================================

/// A named category of related choices ("Size", "Toppings").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionGroup {
    /// Unique within the catalog.
    pub id: String,

    pub name: String,

    /// Picks needed before commit succeeds. 0 means optional.
    pub min_selections: u32,

    /// 0 = unlimited, 1 = exclusive, n = at most n.
    pub max_selections: u32,

    /// At least one pick is mandatory, checked alongside `min_selections`.
    pub required: bool,

    /// Presentation only.
    pub display_order: i32,

    pub options: Vec<OptionItem>,
}

impl OptionGroup {
    /// Creates an optional, unlimited group with no options.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        OptionGroup {
            id: id.into(),
            name: name.into(),
            min_selections: 0,
            max_selections: 0,
            required: false,
            display_order: 0,
            options: Vec::new(),
        }
    }

    pub fn min_selections(mut self, min: u32) -> Self {
        self.min_selections = min;
        self
    }

    pub fn max_selections(mut self, max: u32) -> Self {
        self.max_selections = max;
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn display_order(mut self, order: i32) -> Self {
        self.display_order = order;
        self
    }

    /// Appends an option to the group.
    pub fn option(mut self, option: OptionItem) -> Self {
        self.options.push(option);
        self
    }

    /// Returns the selection mode for this group.
    pub fn mode(&self) -> SelectionMode {
        match self.max_selections {
            0 => SelectionMode::Unlimited,
            1 => SelectionMode::Exclusive,
            n => SelectionMode::Capped(n),
        }
    }

    /// Finds an option by id within this group.
    pub fn find_option(&self, option_id: &str) -> Option<&OptionItem> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Options sorted for display. Catalog order is left untouched.
    pub fn options_in_display_order(&self) -> Vec<&OptionItem> {
        let mut options: Vec<&OptionItem> = self.options.iter().collect();
        options.sort_by_key(|o| o.display_order);
        options
    }

    /// Checks the group's own fields and its options.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_identifier("option group id", &self.id)?;
        validate_display_name("option group name", &self.name)?;
        validate_selection_bounds(&self.name, self.min_selections, self.max_selections)?;

        let mut seen = HashSet::new();
        for option in &self.options {
            validate_identifier("option id", &option.id)?;
            validate_display_name("option name", &option.name)?;
            validate_price("additional price", option.additional_price)?;

            if !seen.insert(option.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: format!("option id in group '{}'", self.name),
                    value: option.id.clone(),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The option groups of one product, in catalog order.
///
/// Built once when a configuration opens and read-only afterwards. Catalog
/// order drives validation message order; `display_order` does not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OptionGroup>", into = "Vec<OptionGroup>")]
pub struct Catalog {
    groups: Vec<OptionGroup>,
}

impl Catalog {
    /// Builds a catalog, rejecting malformed data.
    ///
    /// ## Checks
    /// - group ids unique, option ids unique within their group
    /// - names present, prices non-negative
    /// - `min_selections <= max_selections` whenever max is bounded
    pub fn new(groups: Vec<OptionGroup>) -> ValidationResult<Self> {
        let mut seen = HashSet::new();
        for group in &groups {
            group.validate()?;

            if !seen.insert(group.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "option group id".to_string(),
                    value: group.id.clone(),
                });
            }
        }

        Ok(Catalog { groups })
    }

    /// A product without configurable options.
    pub fn empty() -> Self {
        Catalog::default()
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Looks up a group by id.
    pub fn get_group(&self, group_id: &str) -> CatalogResult<&OptionGroup> {
        self.groups
            .iter()
            .find(|g| g.id == group_id)
            .ok_or_else(|| CatalogError::group_not_found(group_id))
    }

    /// Looks up an option under a specific group.
    ///
    /// An option id that only exists under a different group is reported as
    /// not found.
    pub fn get_option(&self, group_id: &str, option_id: &str) -> CatalogResult<&OptionItem> {
        self.get_group(group_id)?
            .find_option(option_id)
            .ok_or_else(|| CatalogError::option_not_found(group_id, option_id))
    }

    /// Groups sorted for display.
    pub fn groups_in_display_order(&self) -> Vec<&OptionGroup> {
        let mut groups: Vec<&OptionGroup> = self.groups.iter().collect();
        groups.sort_by_key(|g| g.display_order);
        groups
    }
}

impl TryFrom<Vec<OptionGroup>> for Catalog {
    type Error = ValidationError;

    fn try_from(groups: Vec<OptionGroup>) -> Result<Self, Self::Error> {
        Catalog::new(groups)
    }
}

impl From<Catalog> for Vec<OptionGroup> {
    fn from(catalog: Catalog) -> Self {
        catalog.groups
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
