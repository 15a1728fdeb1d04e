//! Seed the catalogue with demo products.
//!
//! Products come from a YAML list when `--file` is given:
//!
//! ```yaml
//! - name: Batik Shirt
//!   description: Hand-drawn batik, cotton
//!   price: 250000
//!   image: https://cdn.example/batik.png
//!   stock: 12
//! ```
//!
//! Otherwise a small built-in list is inserted. Every product goes through
//! `ProductService`, so the usual validation applies.

use std::path::Path;
use std::sync::Arc;

use sea_apd_api::db::PgProductRepository;
use sea_apd_api::models::requests::ProductRequest;
use sea_apd_api::services::ProductService;
use tracing::{error, info};

use super::connect;

/// Seed products from `file_path`, or from the built-in list.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the database is
/// unreachable. Individual invalid products are logged and skipped.
pub async fn products(file_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let requests = match file_path {
        Some(file_path) => {
            let path = Path::new(file_path);
            if !path.exists() {
                return Err(format!("File not found: {file_path}").into());
            }
            info!(path = %file_path, "Loading products from file");
            let content = tokio::fs::read_to_string(path).await?;
            parse_products(&content)?
        }
        None => demo_products(),
    };

    info!(products = requests.len(), "Parsed product list");

    let pool = connect().await?;
    let service = ProductService::new(Arc::new(PgProductRepository::new(pool)));

    let mut inserted = 0usize;
    let mut failed = 0usize;
    for request in requests {
        let name = request.name.clone();
        match service.create_product(request).await {
            Ok(product) => {
                inserted += 1;
                info!(product_id = %product.id, "  + {name}");
            }
            Err(e) => {
                failed += 1;
                error!("  - {name}: {e}");
            }
        }
    }

    info!("Seeding complete!");
    info!("  Products inserted: {inserted}");
    if failed > 0 {
        error!("  Failed: {failed}");
    }

    Ok(())
}

fn parse_products(content: &str) -> Result<Vec<ProductRequest>, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

fn demo_products() -> Vec<ProductRequest> {
    [
        ("Batik Shirt", "Hand-drawn batik, cotton", 250_000, 12),
        ("Kopi Toraja 250g", "Single-origin arabica beans", 95_000, 40),
        ("Rattan Basket", "Woven by hand, medium size", 180_000, 8),
        ("Sambal Set", "Three jars: matah, ijo, bawang", 75_000, 25),
    ]
    .into_iter()
    .map(|(name, description, price, stock)| ProductRequest {
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        image: String::new(),
        stock,
    })
    .collect()
}
