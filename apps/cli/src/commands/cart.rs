//! # Cart Commands
//!
//! Staging `--item SKU=QTY` arguments into the cart and pricing it.
//!
//! ## Quote Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #  SKU        PRODUCT            QTY   BASE    DISC.  TAXABLE  GST  ..  │
//! │  1  APEX-20L   Apex Ultima 20L      2  200.00  29.00   171.00  30.78 ..  │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  Base total / Discount / Taxable / CGST+SGST or IGST / Net total        │
//! │  Total payable   ₹202.00   (40 L)                                       │
//! │  Two Hundred Two Rupees Only                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use dispatch_core::money::round_money;
use dispatch_core::words::amount_in_words;
use dispatch_core::{CoreError, GstSplit, SupplyKind, SHOP_STATE_CODE};
use dispatch_db::Database;
use tracing::debug;

use crate::cli::ItemArg;
use crate::error::CliResult;
use crate::state::{AppConfig, CartState};

/// Looks up each SKU and stages it in the cart, in argument order.
///
/// Stops at the first unknown SKU or rejected quantity; lines staged
/// before that stay in the cart.
pub async fn stage_items(db: &Database, cart: &CartState, items: &[ItemArg]) -> CliResult<()> {
    for item in items {
        let product = db
            .products()
            .get_by_sku(&item.sku)
            .await?
            .ok_or_else(|| CoreError::ProductNotFound(item.sku.clone()))?;

        cart.with_cart_mut(|c| c.add(&product, item.quantity))?;
        debug!(sku = %product.sku, quantity = item.quantity, "Staged item");
    }
    Ok(())
}

/// Renders the priced cart for a customer in `state_code`.
pub fn render_quote(cart: &CartState, config: &AppConfig, state_code: &str) -> String {
    let money = |amount| config.format_currency(amount);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>3}  {:<14} {:<28} {:>5} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "#", "SKU", "PRODUCT", "QTY", "BASE", "DISCOUNT", "TAXABLE", "GST", "TOTAL"
    );

    cart.with_cart(|c| {
        for (idx, line) in c.lines().iter().enumerate() {
            let b = line.breakdown();
            let _ = writeln!(
                out,
                "{:>3}  {:<14} {:<28} {:>5} {:>12} {:>12} {:>12} {:>12} {:>12}",
                idx + 1,
                line.sku,
                line.name,
                line.quantity,
                money(b.base),
                money(b.discount()),
                money(b.taxable),
                money(b.gst),
                money(b.total),
            );
        }
    });

    let totals = cart.totals();
    let split = GstSplit::compute(totals.total_gst, state_code, SHOP_STATE_CODE);

    let _ = writeln!(out, "{}", "-".repeat(124));
    let _ = writeln!(out, "{:<16}{:>16}", "Base total", money(totals.base_total));
    let _ = writeln!(out, "{:<16}{:>16}", "Discount", money(totals.total_discount));
    let _ = writeln!(out, "{:<16}{:>16}", "Taxable", money(totals.taxable_total()));
    match split.kind {
        SupplyKind::IntraState => {
            let _ = writeln!(out, "{:<16}{:>16}", "CGST", money(split.cgst));
            let _ = writeln!(out, "{:<16}{:>16}", "SGST", money(split.sgst));
        }
        SupplyKind::InterState => {
            let _ = writeln!(out, "{:<16}{:>16}", "IGST", money(split.igst));
        }
    }
    let _ = writeln!(out, "{:<16}{:>16}", "Net total", money(totals.net_total));
    let _ = writeln!(
        out,
        "{:<16}{:>16}   ({} L)",
        "Total payable",
        money(totals.payable()),
        totals.total_litres().normalize()
    );
    let _ = writeln!(out, "{}", amount_in_words(round_money(totals.payable())));

    out
}
