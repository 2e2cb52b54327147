//! # State Module
//!
//! Separate state types, so each command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │   Database   │  │  CartState   │  │ SessionState │  │ Storefront  │ │
//! │  │  (menu-db)   │  │  Arc<Mutex<  │  │ Mutex<Map<   │  │ Config      │ │
//! │  │  SQLite pool │  │    Cart>>    │  │ id, Config-  │  │ tenant,     │ │
//! │  │              │  │              │  │ urator>>     │  │ currency    │ │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: pool is internally synchronized                           │
//! │  • CartState / SessionState: Mutex, held only for in-memory work       │
//! │  • StorefrontConfig: read-only after startup                           │
//! │  Lock order when both are needed: sessions, then cart.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod session;

pub use cart::{Cart, CartItem, CartState, CartTotals};
pub use config::{ConfigError, StorefrontConfig, DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_IDLE_MINUTES};
pub use session::SessionState;
