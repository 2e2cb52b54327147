//! # Menu Storefront
//!
//! Application layer of the weekly menu storefront: wires configuration,
//! the database and in-memory state together and exposes the commands the
//! frontend invokes.
//!
//! ## Module Organization
//! ```text
//! menu_storefront/
//! ├── lib.rs          ◄─── You are here (startup, tracing)
//! ├── state/
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── config.rs   ◄─── Environment configuration
//! │   └── session.rs  ◄─── Open configuration sessions
//! ├── commands/
//! │   ├── menu.rs     ◄─── Menu listing, product options
//! │   ├── configure.rs◄─── Option selection, add to cart
//! │   └── cart.rs     ◄─── Cart manipulation
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()          RUST_LOG or "info,menu=debug,sqlx=warn"    │
//! │  2. StorefrontConfig::load  MENU_* variables, platform data dir        │
//! │  3. Storefront::start       SQLite pool + migrations, empty cart       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use chrono::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use menu_db::{Database, DbConfig, DbResult};

use state::{CartState, SessionState, StorefrontConfig};

/// Everything the commands need, owned in one place.
#[derive(Debug)]
pub struct Storefront {
    pub db: Database,
    pub cart: CartState,
    pub sessions: SessionState,
    pub config: StorefrontConfig,
}

impl Storefront {
    /// Opens the configured database and starts with an empty cart.
    pub async fn start(config: StorefrontConfig) -> DbResult<Self> {
        info!(
            store = %config.store_name,
            tenant_id = %config.tenant_id,
            access_level = %config.access_level,
            "Starting storefront"
        );

        let db = Database::new(DbConfig::new(config.db_path.clone())).await?;
        info!("Database connected and migrations applied");

        Ok(Storefront::with_database(db, config))
    }

    /// Uses an already opened database (tests use an in-memory one).
    pub fn with_database(db: Database, config: StorefrontConfig) -> Self {
        Storefront {
            db,
            cart: CartState::new(),
            sessions: SessionState::new(
                config.max_sessions,
                Duration::minutes(i64::from(config.session_idle_minutes)),
            ),
            config,
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=menu_db=trace` - Show trace for one crate only
/// - Default: INFO, DEBUG for the menu crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,menu=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
