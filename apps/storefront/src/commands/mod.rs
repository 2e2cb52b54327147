//! # Commands Module
//!
//! Every operation the storefront frontend can invoke.
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── menu.rs       ◄─── Menu listing, product options
//! ├── configure.rs  ◄─── Option selection sessions, add to cart
//! └── cart.rs       ◄─── Cart manipulation
//! ```
//!
//! Each command takes only the state it needs and returns
//! `Result<T, ApiError>`; responses and errors serialize to JSON.

pub mod cart;
pub mod configure;
pub mod menu;
