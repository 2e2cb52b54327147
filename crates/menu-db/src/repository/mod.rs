//! # Repository Module
//!
//! Database repositories for the menu.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront command                                                     │
//! │       │  db.products().get_by_id(id)                                   │
//! │       │  db.option_groups().fetch_catalog(id)                          │
//! │       ▼                                                                 │
//! │  ProductRepository        OptionGroupRepository                        │
//! │  ├── get_by_id            ├── insert_group / insert_option             │
//! │  ├── list_active          ├── list_for_product                         │
//! │  ├── insert               ├── fetch_catalog                            │
//! │  └── update_prices        └── set_option_availability                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`ProductRepository`](product::ProductRepository) - products and prices
//! - [`OptionGroupRepository`](option_group::OptionGroupRepository) - option catalogs

pub mod option_group;
pub mod product;
