//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//!
//! # Generate extra filler products on top of the named ones
//! cargo run -p stockroom-db --bin seed -- --count 500
//! ```
//!
//! ## Generated Catalog
//! A handful of distribution brands, each with a few categories, and
//! named products under every category. Prices and stock levels are
//! deterministic from the product index so repeated runs against a
//! fresh database produce the same catalog.

use chrono::Utc;
use std::env;

use stockroom_core::{Brand, Category, Product};
use stockroom_db::{Database, DbConfig};
use uuid::Uuid;

/// Brands, their categories, and named products per category.
const CATALOG: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Sunrise Foods",
        &[
            (
                "Biscuits",
                &[
                    "Butter Shortcake",
                    "Chocolate Digestive",
                    "Ginger Snaps",
                    "Cream Crackers",
                    "Marie Classic",
                ],
            ),
            (
                "Beverages",
                &[
                    "Mango Nectar 1L",
                    "Apple Juice 1L",
                    "Lemon Soda 500ml",
                    "Sparkling Water 500ml",
                ],
            ),
        ],
    ),
    (
        "Highland Dairy",
        &[
            (
                "Milk",
                &["Full Cream 1L", "Low Fat 1L", "UHT 250ml", "Flavored Chocolate 250ml"],
            ),
            ("Cheese", &["Cheddar Block 400g", "Mozzarella Shred 200g", "Cream Cheese Tub"]),
        ],
    ),
    (
        "Peak Snacks",
        &[
            (
                "Chips",
                &["Salted Classic", "Masala Crunch", "BBQ Ridge", "Sour Cream & Onion"],
            ),
            ("Nuts", &["Roasted Peanuts 200g", "Cashew Mix 150g", "Salted Pistachios 100g"]),
        ],
    ),
    (
        "Crystal Home Care",
        &[
            (
                "Cleaning",
                &["Dish Gel 500ml", "Surface Spray 750ml", "Floor Cleaner 1L"],
            ),
            ("Laundry", &["Detergent Powder 1kg", "Fabric Softener 800ml"]),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut filler_count: usize = 0;
    let mut db_path = String::from("./stockroom_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    filler_count = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Extra filler products to generate (default: 0)");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stockroom Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing catalog
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating catalog...");

    let start = std::time::Instant::now();
    let now = Utc::now();

    let mut brand_count = 0;
    let mut category_count = 0;
    let mut product_count = 0;
    let mut product_index = 0usize;
    let mut last_category_id = String::new();
    let mut last_brand_id = String::new();

    for (brand_name, categories) in CATALOG {
        let brand = Brand {
            id: Uuid::new_v4().to_string(),
            name: brand_name.to_string(),
            created_at: now,
        };
        db.brands().insert(&brand).await?;
        brand_count += 1;
        last_brand_id = brand.id.clone();

        for (category_name, products) in *categories {
            let category = Category {
                id: Uuid::new_v4().to_string(),
                name: category_name.to_string(),
                brand_id: brand.id.clone(),
                created_at: now,
            };
            db.categories().insert(&category).await?;
            category_count += 1;
            last_category_id = category.id.clone();

            for product_name in *products {
                let product =
                    generate_product(product_name, &brand.id, &category.id, product_index);
                db.products().insert(&product).await?;
                product_count += 1;
                product_index += 1;
            }
        }
    }

    // Optional filler products to exercise larger catalogs
    for n in 0..filler_count {
        let name = format!("Filler Product {:04}", n);
        let product = generate_product(&name, &last_brand_id, &last_category_id, product_index);
        db.products().insert(&product).await?;
        product_count += 1;
        product_index += 1;
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Seeded {} brands, {} categories, {} products in {:?}",
        brand_count, category_count, product_count, elapsed
    );
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with deterministic demo data.
fn generate_product(name: &str, brand_id: &str, category_id: &str, seed: usize) -> Product {
    // Price $0.99 - $8.99, stock 0-24 so some products start out of stock
    let price_cents = 99 + ((seed * 37) % 800) as i64;
    let stock = ((seed * 7) % 25) as i64;

    Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        brand_id: brand_id.to_string(),
        category_id: category_id.to_string(),
        price_cents,
        stock,
        description: None,
        image_url: None,
        created_at: Utc::now(),
    }
}
