//! # Access Level Resolution
//!
//! A tenant's admin/plan level can be recorded in several places (the
//! subscription record, a per-tenant override, the legacy profile flag).
//! Callers look those up however they like and hand the results here in
//! priority order; the first source that has an answer wins.
//!
//! ```rust
//! use menu_core::access::{resolve_access_level, AccessLevel};
//!
//! let level = resolve_access_level([None, Some(AccessLevel::Pro), Some(AccessLevel::Basic)]);
//! assert_eq!(level, AccessLevel::Pro);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Feature tier of a tenant, lowest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    /// Public menu viewer only.
    #[default]
    Free,
    /// Menu editing and the delivery storefront.
    Basic,
    /// Configurable options, coupons and order management.
    Pro,
    /// Platform staff.
    Admin,
}

impl AccessLevel {
    /// Whether products at this level may carry option groups.
    pub fn can_configure_options(&self) -> bool {
        *self >= AccessLevel::Pro
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessLevel::Free => "free",
            AccessLevel::Basic => "basic",
            AccessLevel::Pro => "pro",
            AccessLevel::Admin => "admin",
        };
        f.write_str(s)
    }
}

impl FromStr for AccessLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(AccessLevel::Free),
            "basic" => Ok(AccessLevel::Basic),
            "pro" => Ok(AccessLevel::Pro),
            "admin" => Ok(AccessLevel::Admin),
            _ => Err(ValidationError::InvalidFormat {
                field: "access level".to_string(),
                reason: format!("unknown level '{}'", s),
            }),
        }
    }
}

/// Returns the first present level, or [`AccessLevel::Free`].
pub fn resolve_access_level<I>(sources: I) -> AccessLevel
where
    I: IntoIterator<Item = Option<AccessLevel>>,
{
    sources.into_iter().flatten().next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_source_wins() {
        let level = resolve_access_level([Some(AccessLevel::Basic), Some(AccessLevel::Admin)]);
        assert_eq!(level, AccessLevel::Basic);
    }

    #[test]
    fn test_falls_back_to_free() {
        assert_eq!(resolve_access_level([None, None]), AccessLevel::Free);
        assert_eq!(resolve_access_level(Vec::new()), AccessLevel::Free);
    }

    #[test]
    fn test_parse_and_gate() {
        assert_eq!("PRO".parse::<AccessLevel>().unwrap(), AccessLevel::Pro);
        assert!("gold".parse::<AccessLevel>().is_err());

        assert!(AccessLevel::Pro.can_configure_options());
        assert!(AccessLevel::Admin.can_configure_options());
        assert!(!AccessLevel::Basic.can_configure_options());
    }
}
