//! # Seed Data Generator
//!
//! Populates a product store with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p depot-db --bin seed
//!
//! # Specify database path
//! cargo run -p depot-db --bin seed -- --db ./data/depot.db
//! ```
//!
//! ## Generated Data
//! Four categories with a handful of products each:
//! - Tools (hammers, drivers, tape)
//! - Cables (HDMI, USB, patch leads)
//! - Storage (drives, cards)
//! - Office (paper, pens, staplers)
//!
//! Stock levels are mixed so the low-stock report has something to say.

use std::env;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use depot_core::NewProduct;
use depot_db::{ensure_schema, ConnectionProvider, ProductRepository};

/// Demo catalog: category name, then (product name, price in cents, stock).
const SEED_DATA: &[(&str, &[(&str, i64, i64)])] = &[
    (
        "Tools",
        &[
            ("Claw Hammer 16oz", 1499, 12),
            ("Phillips Screwdriver", 649, 30),
            ("Flathead Screwdriver", 599, 4),
            ("Tape Measure 5m", 899, 18),
            ("Utility Knife", 749, 2),
            ("Hex Key Set", 1099, 9),
        ],
    ),
    (
        "Cables",
        &[
            ("HDMI Cable 2m", 1299, 25),
            ("USB-C Cable 1m", 999, 40),
            ("Cat6 Patch Lead 3m", 549, 5),
            ("DisplayPort Cable 2m", 1599, 0),
            ("Lightning Cable 1m", 1899, 14),
        ],
    ),
    (
        "Storage",
        &[
            ("SSD 500GB", 5999, 8),
            ("SSD 1TB", 9999, 3),
            ("MicroSD Card 128GB", 1799, 22),
            ("USB Flash Drive 64GB", 1199, 35),
            ("External HDD 2TB", 7499, 1),
        ],
    ),
    (
        "Office",
        &[
            ("Copy Paper A4 500pk", 799, 50),
            ("Ballpoint Pens 10pk", 399, 60),
            ("Stapler", 1249, 7),
            ("Staples 5000pk", 299, 0),
            ("Sticky Notes 12pk", 649, 28),
        ],
    ),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Repository logs stay quiet unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./depot_dev.db");

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
                println!("Depot Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./depot_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Depot Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    // Connect and prepare the store
    let url = format!("sqlite://{}", db_path);
    let provider = ConnectionProvider::new(&url).context("database url rejected")?;
    ensure_schema(&provider)
        .await
        .context("schema bootstrap failed")?;
    let repo = ProductRepository::new(provider).context("catalog verification failed")?;

    println!("✓ Connected to database");
    println!("✓ Schema ensured");

    // Refuse to double-seed
    let existing = repo.count_total().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let mut generated = 0;

    for (category_name, products) in SEED_DATA {
        let category_id = insert_category(&repo, category_name).await?;

        for (name, price_cents, stock) in products.iter() {
            let draft = NewProduct::new(*name, *price_cents, *stock);
            let product_id = repo.add(&draft).await?;
            link_category(&repo, product_id, category_id).await?;
            generated += 1;
        }

        println!("  {} ({} products)", category_name, products.len());
    }

    // Summary straight from the repository
    let count = repo.count_total().await?;
    let value = repo.total_stock_value().await?;
    let low = repo.get_with_low_stock(None).await?;

    println!();
    println!("✓ Generated {} products", generated);
    println!("  In store:     {}", count);
    println!("  Stock value:  {}", value);
    println!("  Low on stock: {}", low.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Inserts a category row. The repository's operation surface covers
/// products only, so categories are written directly.
async fn insert_category(repo: &ProductRepository, name: &str) -> anyhow::Result<i64> {
    let mut conn = repo.provider().acquire().await?;
    let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
        .bind(name)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Points a product at its category.
async fn link_category(
    repo: &ProductRepository,
    product_id: i64,
    category_id: i64,
) -> anyhow::Result<()> {
    let mut conn = repo.provider().acquire().await?;
    sqlx::query("UPDATE products SET category_id = ?1 WHERE id = ?2")
        .bind(category_id)
        .bind(product_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
