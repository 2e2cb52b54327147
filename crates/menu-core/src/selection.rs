//! # Selection State Machine
//!
//! The options a customer has currently picked for one product, and the
//! transitions that change them.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────┐  select   ┌────────────────────┐                          │
//! │   │  Empty  │──────────►│ Partially-Selected │◄──┐ select / deselect   │
//! │   └─────────┘           └─────────┬──────────┘───┘                      │
//! │        ▲                          │                                     │
//! │        └────────── clear ─────────┘                                     │
//! │                                                                         │
//! │   No terminal state: commit and cancel happen outside (configurator).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## select(group, option)
//! 1. Option must exist under that group and be available (else error,
//!    nothing changes).
//! 2. Already picked: no-op.
//! 3. Exclusive group (max 1): the previous pick is replaced.
//! 4. Capped group (max n > 1) already holding n picks: ignored, reported as
//!    [`SelectOutcome::CapReached`].
//! 5. Otherwise the pick is appended.
//!
//! Transitions are pure: they borrow the current state and return a new
//! one. Min / required rules are not enforced here; they are checked at
//! commit time by [`crate::pricing::validate`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Catalog, SelectionMode};
use crate::error::{CatalogError, CatalogResult};
use crate::money::Money;

// =============================================================================
// Selected Option
// =============================================================================

/// One picked option, with name and price frozen from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedOption {
    pub group_id: String,
    pub option_id: String,
    pub name: String,
    pub additional_price: Money,
}

impl SelectedOption {
    fn matches(&self, group_id: &str, option_id: &str) -> bool {
        self.group_id == group_id && self.option_id == option_id
    }
}

// =============================================================================
// Select Outcome
// =============================================================================

/// What a `select` call did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    /// The pick was appended.
    Added,
    /// Exclusive group: the previous pick was swapped for this one.
    Replaced,
    /// Already picked; nothing changed.
    AlreadySelected,
    /// The group is full; nothing changed.
    CapReached,
}

impl SelectOutcome {
    /// Whether the selection changed.
    pub fn changed(&self) -> bool {
        matches!(self, SelectOutcome::Added | SelectOutcome::Replaced)
    }
}

/// The state after a select, plus what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub selection: Selection,
    pub outcome: SelectOutcome,
}

// =============================================================================
// Selection
// =============================================================================

/// The ordered set of picked options.
///
/// ## Invariants
/// - no two entries share `(group_id, option_id)`
/// - entries per group never exceed a bounded `max_selections`
/// - insertion order is kept (it drives the line item description)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection {
    items: Vec<SelectedOption>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn items(&self) -> &[SelectedOption] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, group_id: &str, option_id: &str) -> bool {
        self.items.iter().any(|s| s.matches(group_id, option_id))
    }

    /// Number of picks in one group.
    pub fn count_in_group(&self, group_id: &str) -> usize {
        self.items.iter().filter(|s| s.group_id == group_id).count()
    }

    /// Sum of all option deltas.
    pub fn additional_total(&self) -> Money {
        self.items.iter().map(|s| s.additional_price).sum()
    }

    /// Applies a pick against `catalog`.
    ///
    /// ## Errors
    /// - [`CatalogError::GroupNotFound`] / [`CatalogError::OptionNotFound`]
    ///   for stale ids
    /// - [`CatalogError::OptionUnavailable`] for sold-out options
    ///
    /// On error `self` is untouched and no new state exists.
    pub fn select(
        &self,
        catalog: &Catalog,
        group_id: &str,
        option_id: &str,
    ) -> CatalogResult<Transition> {
        let group = catalog.get_group(group_id)?;
        let option = catalog.get_option(group_id, option_id)?;

        if !option.available {
            return Err(CatalogError::OptionUnavailable {
                group_id: group_id.to_string(),
                option_id: option_id.to_string(),
            });
        }

        if self.contains(group_id, option_id) {
            return Ok(self.unchanged(SelectOutcome::AlreadySelected));
        }

        let current_group_count = self.count_in_group(group_id);
        let picked = SelectedOption {
            group_id: group.id.clone(),
            option_id: option.id.clone(),
            name: option.name.clone(),
            additional_price: option.additional_price,
        };

        let transition = match group.mode() {
            SelectionMode::Exclusive => {
                let mut items: Vec<SelectedOption> = self
                    .items
                    .iter()
                    .filter(|s| s.group_id != group_id)
                    .cloned()
                    .collect();
                items.push(picked);

                let outcome = if current_group_count > 0 {
                    SelectOutcome::Replaced
                } else {
                    SelectOutcome::Added
                };
                Transition {
                    selection: Selection { items },
                    outcome,
                }
            }
            SelectionMode::Capped(max) if current_group_count >= max as usize => {
                self.unchanged(SelectOutcome::CapReached)
            }
            SelectionMode::Capped(_) | SelectionMode::Unlimited => {
                let mut items = self.items.clone();
                items.push(picked);
                Transition {
                    selection: Selection { items },
                    outcome: SelectOutcome::Added,
                }
            }
        };

        Ok(transition)
    }

    /// Removes a pick. Absent picks are ignored; this never fails.
    pub fn deselect(&self, group_id: &str, option_id: &str) -> Selection {
        Selection {
            items: self
                .items
                .iter()
                .filter(|s| !s.matches(group_id, option_id))
                .cloned()
                .collect(),
        }
    }

    /// Returns the empty state.
    pub fn clear(&self) -> Selection {
        Selection::new()
    }

    fn unchanged(&self, outcome: SelectOutcome) -> Transition {
        Transition {
            selection: self.clone(),
            outcome,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
