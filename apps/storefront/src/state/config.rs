//! # Configuration State
//!
//! Storefront configuration loaded at startup.
//!
//! ## Sources (Priority Order)
//! 1. Environment variables (`MENU_*`)
//! 2. Defaults (this file); the database goes to the platform data dir
//!
//! Read-only after initialization, so no mutex needed.

use directories::ProjectDirs;
use serde::Serialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

use menu_core::access::{resolve_access_level, AccessLevel};
use menu_core::DEFAULT_TENANT_ID;

/// Open configuration sessions allowed at once.
pub const DEFAULT_MAX_SESSIONS: usize = 64;

/// Minutes a configuration session may sit unused before it is evicted.
pub const DEFAULT_SESSION_IDLE_MINUTES: u32 = 30;

/// Storefront configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Tenant (restaurant) whose menu is served.
    pub tenant_id: String,

    /// Store name (displayed on the menu page)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// SQLite database file.
    #[serde(skip)]
    pub db_path: PathBuf,

    /// Upper bound on concurrently open configuration sessions.
    pub max_sessions: usize,

    /// Idle time after which an open session may be evicted.
    pub session_idle_minutes: u32,

    /// Feature tier; decides whether option groups are offered.
    pub access_level: AccessLevel,
}

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory: {0}")]
    Io(#[from] std::io::Error),
}

impl StorefrontConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StorefrontConfig::default();

        let max_sessions = match lookup("MENU_MAX_SESSIONS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "MENU_MAX_SESSIONS".to_string(),
                        value: raw,
                    })
                }
            },
            None => defaults.max_sessions,
        };

        let session_idle_minutes = match lookup("MENU_SESSION_IDLE_MINUTES") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: "MENU_SESSION_IDLE_MINUTES".to_string(),
                        value: raw,
                    })
                }
            },
            None => defaults.session_idle_minutes,
        };

        let access_override = match lookup("MENU_ACCESS_LEVEL") {
            Some(raw) => Some(raw.parse::<AccessLevel>().map_err(|_| ConfigError::InvalidValue {
                var: "MENU_ACCESS_LEVEL".to_string(),
                value: raw.clone(),
            })?),
            None => None,
        };

        let db_path = match lookup("MENU_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        Ok(StorefrontConfig {
            tenant_id: lookup("MENU_TENANT_ID").unwrap_or(defaults.tenant_id),
            store_name: lookup("MENU_STORE_NAME").unwrap_or(defaults.store_name),
            currency_code: lookup("MENU_CURRENCY_CODE").unwrap_or(defaults.currency_code),
            currency_symbol: lookup("MENU_CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            db_path,
            max_sessions,
            session_idle_minutes,
            access_level: resolve_access_level([access_override, Some(defaults.access_level)]),
        })
    }
}

impl Default for StorefrontConfig {
    /// Development defaults: single tenant, BRL, `menu.db` in the working
    /// directory.
    fn default() -> Self {
        StorefrontConfig {
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            store_name: "Weekly Menu".to_string(),
            currency_code: "BRL".to_string(),
            currency_symbol: "R$".to_string(),
            db_path: PathBuf::from("menu.db"),
            max_sessions: DEFAULT_MAX_SESSIONS,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
            access_level: AccessLevel::Pro,
        }
    }
}

/// Platform-specific database location.
///
/// - **macOS**: `~/Library/Application Support/com.menu.storefront/menu.db`
/// - **Windows**: `%APPDATA%\menu\storefront\data\menu.db`
/// - **Linux**: `~/.local/share/storefront/menu.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "menu", "storefront").ok_or(ConfigError::NoDataDir)?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("menu.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("MENU_STORE_NAME", "Cantina"),
            ("MENU_DB_PATH", "/tmp/cantina.db"),
            ("MENU_MAX_SESSIONS", "8"),
            ("MENU_SESSION_IDLE_MINUTES", "5"),
            ("MENU_ACCESS_LEVEL", "basic"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Cantina");
        assert_eq!(config.db_path, PathBuf::from("/tmp/cantina.db"));
        assert_eq!(config.max_sessions, 8);
        assert_eq!(config.session_idle_minutes, 5);
        assert_eq!(config.access_level, AccessLevel::Basic);
        assert_eq!(config.tenant_id, DEFAULT_TENANT_ID);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = StorefrontConfig::from_lookup(lookup_from(&[
            ("MENU_DB_PATH", "/tmp/x.db"),
            ("MENU_MAX_SESSIONS", "0"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = StorefrontConfig::from_lookup(lookup_from(&[
            ("MENU_DB_PATH", "/tmp/x.db"),
            ("MENU_ACCESS_LEVEL", "gold"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        let result = StorefrontConfig::from_lookup(lookup_from(&[
            ("MENU_DB_PATH", "/tmp/x.db"),
            ("MENU_SESSION_IDLE_MINUTES", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
