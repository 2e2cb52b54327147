//! # Menu Storefront Entry Point
//!
//! Starts the storefront against the configured database and prints the
//! current menu. Serving the commands to a frontend is the host's job.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load `MENU_*` configuration
//! 3. Connect to database & run migrations
//! 4. List the active menu

use menu_storefront::commands::menu::list_menu;
use menu_storefront::state::StorefrontConfig;
use menu_storefront::{init_tracing, Storefront};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = StorefrontConfig::load()?;
    let storefront = Storefront::start(config).await?;

    let menu = list_menu(&storefront.db, &storefront.config, None).await?;
    println!("{} ({} products)", storefront.config.store_name, menu.len());
    for product in &menu {
        println!(
            "  {:<24} {}{}.{:02}",
            product.name,
            storefront.config.currency_symbol,
            product.base_price_cents / 100,
            product.base_price_cents % 100
        );
    }

    storefront.db.close().await;
    Ok(())
}
