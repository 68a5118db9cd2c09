//! # Demo Catalog Loader
//!
//! Writes the demo products into a Redis-backed catalog.
//!
//! ## Usage
//! ```bash
//! # Load into the server named by REDIS_URL (or redis://127.0.0.1/)
//! cargo run -p catalog-db --bin seed
//!
//! # Explicit server, clearing existing products first
//! cargo run -p catalog-db --bin seed -- --redis-url redis://10.0.0.5/ --reset
//! ```

use std::env;

use catalog_db::seed::load_demo_products;
use catalog_db::{CatalogStore, RedisCatalog};

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1/";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut redis_url = env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--redis-url" | "-r" => {
                if i + 1 < args.len() {
                    redis_url = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset" => reset = true,
            "--help" | "-h" => {
                println!("Product Catalog Seed Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -r, --redis-url <URL>  Redis server (default: $REDIS_URL or {DEFAULT_REDIS_URL})");
                println!("      --reset            Remove all products before loading");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {other}");
            }
        }
        i += 1;
    }

    println!("🌱 Product Catalog Seed Loader");
    println!("==============================");
    println!("Redis: {}", redis_url);
    println!();

    let store = RedisCatalog::connect(&redis_url).await?;
    println!("✓ Connected to Redis");

    if reset {
        store.remove_all().await?;
        println!("✓ Removed existing products");
    }

    let count = load_demo_products(&store).await?;
    println!("✓ Loaded {} products", count);

    let total = store.all().await?.len();
    println!("  Catalog now holds {} products", total);

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
