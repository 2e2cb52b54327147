//! # Demo Menu Seeder
//!
//! Populates the database with a small weekly menu for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./menu_dev.db
//! cargo run -p menu-db --bin seed
//!
//! # Specify database path (or set MENU_DB_PATH)
//! cargo run -p menu-db --bin seed -- --db ./data/menu.db
//! ```
//!
//! ## Seeded Menu
//! - Burger: Size (required, exclusive), Toppings (up to 2), Sauces (unlimited)
//! - Pizza: Size (required, exclusive), Flavors (1 to 2), Crust (optional, exclusive)
//! - Soda: no options, promotional price

use chrono::Utc;
use std::env;

use menu_core::{Money, MenuProduct, OptionGroup, OptionItem, DEFAULT_TENANT_ID};
use menu_db::{generate_id, Database, DbConfig};

/// (name, delta in cents)
type Choice = (&'static str, i64);

struct GroupSeed {
    name: &'static str,
    min: u32,
    max: u32,
    required: bool,
    choices: &'static [Choice],
}

struct ProductSeed {
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    promotional_price_cents: Option<i64>,
    groups: &'static [GroupSeed],
}

const MENU: &[ProductSeed] = &[
    ProductSeed {
        name: "Burger",
        description: "Grilled beef burger",
        price_cents: 1000,
        promotional_price_cents: None,
        groups: &[
            GroupSeed {
                name: "Size",
                min: 1,
                max: 1,
                required: true,
                choices: &[("P", 0), ("M", 300), ("G", 600)],
            },
            GroupSeed {
                name: "Toppings",
                min: 0,
                max: 2,
                required: false,
                choices: &[("Bacon", 200), ("Cheese", 150), ("Egg", 200)],
            },
            GroupSeed {
                name: "Sauces",
                min: 0,
                max: 0,
                required: false,
                choices: &[("Ketchup", 0), ("Mustard", 0), ("Garlic Mayo", 50)],
            },
        ],
    },
    ProductSeed {
        name: "Pizza",
        description: "Wood-fired pizza, up to two flavors",
        price_cents: 3000,
        promotional_price_cents: None,
        groups: &[
            GroupSeed {
                name: "Size",
                min: 1,
                max: 1,
                required: true,
                choices: &[("Medium", 0), ("Large", 800)],
            },
            GroupSeed {
                name: "Flavors",
                min: 1,
                max: 2,
                required: true,
                choices: &[("Margherita", 0), ("Pepperoni", 400), ("Four Cheese", 500)],
            },
            GroupSeed {
                name: "Crust",
                min: 0,
                max: 1,
                required: false,
                choices: &[("Stuffed", 600)],
            },
        ],
    },
    ProductSeed {
        name: "Soda",
        description: "350ml can",
        price_cents: 600,
        promotional_price_cents: Some(450),
        groups: &[],
    },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("MENU_DB_PATH").unwrap_or_else(|_| String::from("./menu_dev.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Menu Storefront Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./menu_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Menu Storefront Seeder");
    println!("======================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    for seed in MENU {
        let product = build_product(seed);
        db.products().insert(&product).await?;

        for (order, group_seed) in seed.groups.iter().enumerate() {
            let group = build_group(group_seed, order as i32);
            db.option_groups().insert_group(&product.id, &group).await?;
        }

        println!(
            "  {} {} ({} option groups)",
            product.name,
            product.base_unit_price(),
            seed.groups.len()
        );
    }

    // Round-trip every catalog through the same path the storefront uses
    for product in db.products().list_active(DEFAULT_TENANT_ID, 100).await? {
        let catalog = db.option_groups().fetch_catalog(&product.id).await?;
        println!("✓ {} catalog loads with {} groups", product.name, catalog.len());
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn build_product(seed: &ProductSeed) -> MenuProduct {
    let now = Utc::now();

    MenuProduct {
        id: generate_id(),
        tenant_id: DEFAULT_TENANT_ID.to_string(),
        name: seed.name.to_string(),
        description: Some(seed.description.to_string()),
        price_cents: seed.price_cents,
        promotional_price_cents: seed.promotional_price_cents,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

fn build_group(seed: &GroupSeed, display_order: i32) -> OptionGroup {
    seed.choices.iter().enumerate().fold(
        OptionGroup::new(generate_id(), seed.name)
            .min_selections(seed.min)
            .max_selections(seed.max)
            .required(seed.required)
            .display_order(display_order),
        |group, (order, (name, delta))| {
            group.option(
                OptionItem::new(generate_id(), *name, Money::from_cents(*delta))
                    .display_order(order as i32),
            )
        },
    )
}
