//! # Product Commands
//!
//! Catalog listing for the operator picking what to stage.

use std::fmt::Write;

use dispatch_core::{Product, Rate};
use dispatch_db::Database;
use tracing::debug;

use crate::error::CliResult;
use crate::state::AppConfig;

/// Lists active products matching `query` (all when `None`).
pub async fn list_products(
    db: &Database,
    config: &AppConfig,
    query: Option<&str>,
    limit: u32,
) -> CliResult<String> {
    let products = db.products().search(query.unwrap_or(""), limit).await?;
    debug!(count = products.len(), "list_products command");
    Ok(render_products(&products, config))
}

/// Catalog table, one product per row.
pub fn render_products(products: &[Product], config: &AppConfig) -> String {
    if products.is_empty() {
        return "No products found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:<36} {:>12} {:>8} {:>6} {:>6} {:>6} {:>7}",
        "SKU", "NAME", "DP", "VOLUME", "BILL", "CD", "GST", "STOCK"
    );

    for product in products {
        let _ = writeln!(
            out,
            "{:<16} {:<36} {:>12} {:>7}L {:>6} {:>6} {:>6} {:>7}",
            product.sku,
            product.name,
            config.format_currency(product.dp().to_decimal()),
            rust_decimal::Decimal::new(product.ml_per_unit, 3).normalize(),
            Rate::from_bps(product.bill_discount_bps).to_string(),
            Rate::from_bps(product.cash_discount_bps).to_string(),
            Rate::from_bps(product.gst_bps).to_string(),
            product.stock,
        );
    }

    out
}
