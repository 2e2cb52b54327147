//! # Validation & Pricing
//!
//! Decides whether a selection may be committed and, if so, what it costs.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate(catalog, selection)                                           │
//! │       │                                                                 │
//! │       ├── non-empty ──► commit refused, messages shown verbatim         │
//! │       │                                                                 │
//! │       └── empty ──► compute_total_price(base, selection, qty)           │
//! │                     build_line_item_description(name, selection)        │
//! │                          │                                              │
//! │                          ▼                                              │
//! │                     LineItem ──► cart                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing an invalid selection is never done by the protocol;
//! [`crate::configurator::ProductConfigurator::commit`] enforces the order.
//!
//! ## Example
//! ```rust
//! use menu_core::money::Money;
//! use menu_core::pricing::compute_total_price;
//! use menu_core::selection::Selection;
//!
//! let total = compute_total_price(Money::from_cents(2000), &Selection::new(), 2);
//! assert_eq!(total.cents(), 4000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::selection::Selection;

// =============================================================================
// Violation
// =============================================================================

/// One broken selection rule, user-recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A required group has no pick.
    RequiredMissing { group_name: String },

    /// Fewer picks than `min_selections`.
    BelowMinimum { group_name: String, min: u32 },

    /// More picks than `max_selections`.
    AboveMaximum { group_name: String, max: u32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RequiredMissing { group_name } => {
                write!(f, "Select at least one option from '{}'", group_name)
            }
            Violation::BelowMinimum { group_name, min } => {
                write!(f, "'{}' requires at least {} selection(s)", group_name, min)
            }
            Violation::AboveMaximum { group_name, max } => {
                write!(f, "'{}' allows at most {} selection(s)", group_name, max)
            }
        }
    }
}

/// Joins violation messages for display, in the order they were found.
pub fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Validation
// =============================================================================

/// Checks every group's rules against the selection.
///
/// Groups are visited in catalog order and all three checks run for each
/// group; nothing short-circuits. The required and minimum checks are
/// independent, so an empty required group with `min_selections >= 1`
/// yields both messages.
///
/// The maximum check repeats what [`Selection::select`] already enforces,
/// since this function is the authoritative commit gate.
pub fn validate(catalog: &Catalog, selection: &Selection) -> Vec<Violation> {
    let mut violations = Vec::new();

    for group in catalog.groups() {
        let count = selection.count_in_group(&group.id);

        if group.required && count == 0 {
            violations.push(Violation::RequiredMissing {
                group_name: group.name.clone(),
            });
        }

        if group.min_selections > 0 && count < group.min_selections as usize {
            violations.push(Violation::BelowMinimum {
                group_name: group.name.clone(),
                min: group.min_selections,
            });
        }

        if group.max_selections > 0 && count > group.max_selections as usize {
            violations.push(Violation::AboveMaximum {
                group_name: group.name.clone(),
                max: group.max_selections,
            });
        }
    }

    violations
}

// =============================================================================
// Pricing
// =============================================================================

/// Picks the base unit price: the promotional price when one is set and
/// it is lower than the list price.
///
/// ```rust
/// use menu_core::money::Money;
/// use menu_core::pricing::base_unit_price;
///
/// let list = Money::from_cents(2500);
/// assert_eq!(base_unit_price(list, Some(Money::from_cents(1990))).cents(), 1990);
/// assert_eq!(base_unit_price(list, Some(Money::from_cents(2990))).cents(), 2500);
/// assert_eq!(base_unit_price(list, None).cents(), 2500);
/// ```
pub fn base_unit_price(list_price: Money, promotional_price: Option<Money>) -> Money {
    match promotional_price {
        Some(promo) if promo < list_price => promo,
        _ => list_price,
    }
}

/// Unit price with every option delta added on top of the base.
pub fn unit_price(base_unit_price: Money, selection: &Selection) -> Money {
    base_unit_price + selection.additional_total()
}

/// [`unit_price`] that reports overflow as `None`.
pub fn checked_unit_price(base_unit_price: Money, selection: &Selection) -> Option<Money> {
    selection
        .items()
        .iter()
        .try_fold(base_unit_price, |acc, s| acc.checked_add(s.additional_price))
}

/// `quantity × (base_unit_price + Σ additional_price)`.
pub fn compute_total_price(base_unit_price: Money, selection: &Selection, quantity: i64) -> Money {
    unit_price(base_unit_price, selection).multiply_quantity(quantity)
}

/// Appends the picked option names to the product description, in the
/// order they were picked: `"Burger (M, Bacon, Cheese)"`.
pub fn build_line_item_description(base_description: &str, selection: &Selection) -> String {
    if selection.is_empty() {
        return base_description.to_string();
    }

    let names: Vec<&str> = selection.items().iter().map(|s| s.name.as_str()).collect();
    format!("{} ({})", base_description, names.join(", "))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::burger_catalog;
    use crate::catalog::{OptionGroup, OptionItem};

    fn select_all(catalog: &Catalog, picks: &[(&str, &str)]) -> Selection {
        picks.iter().fold(Selection::new(), |s, (g, o)| {
            s.select(catalog, g, o).unwrap().selection
        })
    }

    #[test]
    fn test_valid_burger_scenario() {
        let catalog = burger_catalog();
        let selection = select_all(
            &catalog,
            &[("size", "m"), ("toppings", "bacon"), ("toppings", "cheese")],
        );

        assert!(validate(&catalog, &selection).is_empty());
        let total = compute_total_price(Money::from_cents(1000), &selection, 1);
        assert_eq!(total.cents(), 1650);
    }

    #[test]
    fn test_empty_selection_reports_required_and_minimum() {
        let catalog = burger_catalog();
        let violations = validate(&catalog, &Selection::new());

        let messages: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Select at least one option from 'Size'".to_string(),
                "'Size' requires at least 1 selection(s)".to_string(),
            ]
        );
    }

    #[test]
    fn test_violations_accumulate_across_groups() {
        let catalog = Catalog::new(vec![
            OptionGroup::new("bread", "Bread")
                .required(true)
                .option(OptionItem::new("white", "White", Money::zero())),
            OptionGroup::new("sauces", "Sauces")
                .min_selections(2)
                .option(OptionItem::new("bbq", "BBQ", Money::zero()))
                .option(OptionItem::new("mayo", "Mayo", Money::zero())),
        ])
        .unwrap();
        let selection = select_all(&catalog, &[("sauces", "bbq")]);

        let violations = validate(&catalog, &selection);
        assert_eq!(
            violations,
            vec![
                Violation::RequiredMissing {
                    group_name: "Bread".to_string()
                },
                Violation::BelowMinimum {
                    group_name: "Sauces".to_string(),
                    min: 2
                },
            ]
        );
    }

    #[test]
    fn test_maximum_is_rechecked() {
        // Selection built against a looser catalog, validated against a
        // stricter one.
        let loose = Catalog::new(vec![OptionGroup::new("t", "Toppings")
            .option(OptionItem::new("a", "A", Money::zero()))
            .option(OptionItem::new("b", "B", Money::zero()))])
        .unwrap();
        let strict = Catalog::new(vec![OptionGroup::new("t", "Toppings")
            .max_selections(1)
            .option(OptionItem::new("a", "A", Money::zero()))
            .option(OptionItem::new("b", "B", Money::zero()))])
        .unwrap();

        let selection = select_all(&loose, &[("t", "a"), ("t", "b")]);
        let violations = validate(&strict, &selection);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "'Toppings' allows at most 1 selection(s)"
        );
    }

    #[test]
    fn test_price_composition() {
        let catalog = Catalog::new(vec![OptionGroup::new("x", "Extras")
            .option(OptionItem::new("a", "A", Money::from_cents(300)))
            .option(OptionItem::new("b", "B", Money::from_cents(150)))])
        .unwrap();
        let selection = select_all(&catalog, &[("x", "a"), ("x", "b")]);

        let total = compute_total_price(Money::from_cents(2000), &selection, 2);
        assert_eq!(total.cents(), 4900);
        assert_eq!(unit_price(Money::from_cents(2000), &selection).cents(), 2450);
    }

    #[test]
    fn test_promotion_adds_options_on_top() {
        let catalog = burger_catalog();
        let selection = select_all(&catalog, &[("size", "g")]);

        let base = base_unit_price(Money::from_cents(1000), Some(Money::from_cents(800)));
        assert_eq!(compute_total_price(base, &selection, 1).cents(), 1400);
    }

    #[test]
    fn test_description_follows_pick_order() {
        let catalog = burger_catalog();
        let selection = select_all(
            &catalog,
            &[("toppings", "cheese"), ("size", "m"), ("toppings", "bacon")],
        );

        assert_eq!(
            build_line_item_description("Burger", &selection),
            "Burger (Cheese, M, Bacon)"
        );
        assert_eq!(
            build_line_item_description("Burger", &Selection::new()),
            "Burger"
        );
    }

    #[test]
    fn test_violation_serializes_with_kind_tag() {
        let json = serde_json::to_value(Violation::BelowMinimum {
            group_name: "Size".to_string(),
            min: 1,
        })
        .unwrap();
        assert_eq!(json["kind"], "below_minimum");
        assert_eq!(json["min"], 1);
    }
}
