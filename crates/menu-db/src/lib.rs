//! # menu-db: Database Layer for the Menu Storefront
//!
//! SQLite storage for products and their option catalogs, using sqlx for
//! async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront command (open_configuration)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     menu-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │◄───│ ProductRepo    │    │  (embedded)  │ │   │
//! │  │   │ CatalogSource │    │ OptionGroupRepo│    │ 001_init.sql │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (or :memory: in tests)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use menu_db::{Database, DbConfig};
//! use menu_core::{CatalogSource, ProductConfigurator};
//!
//! let db = Database::new(DbConfig::new("menu.db")).await?;
//! let product = db.products().get_by_id(id).await?.ok_or(...)?;
//! let configurator = ProductConfigurator::open(&db, product).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::option_group::OptionGroupRepository;
pub use repository::product::{generate_id, ProductRepository};
