use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::product::Product;

const CSV_HEADER: [&str; 2] = ["title", "price"];

/// Keep the first `limit` products, in order.
pub fn apply_limit(mut products: Vec<Product>, limit: Option<usize>) -> Vec<Product> {
    if let Some(n) = limit {
        products.truncate(n);
    }
    products
}

/// One `<title> — <price>` line per product.
pub fn render_text(products: &[Product]) -> String {
    products
        .iter()
        .map(|p| format!("{} — {}", p.title, p.price))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(products: &[Product]) -> Result<String> {
    serde_json::to_string_pretty(products).context("Failed to serialize products as JSON")
}

/// Header row plus one row per product. The header is written even when there are no products.
pub fn write_csv<W: io::Write>(writer: W, products: &[Product]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for p in products {
        wtr.write_record([p.title.as_str(), p.price.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(path: &Path, products: &[Product]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    write_csv(file, products).with_context(|| format!("Failed to write CSV file {}", path.display()))
}
