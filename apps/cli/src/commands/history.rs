//! # History Commands
//!
//! Read-only view of the local sales history log.

use std::fmt::Write;

use dispatch_core::{Money, SaleRecord};
use dispatch_db::Database;
use rust_decimal::Decimal;

use crate::error::CliResult;
use crate::state::AppConfig;

/// Recent history lines, or every line of one order.
pub async fn show_history(
    db: &Database,
    config: &AppConfig,
    limit: u32,
    order_id: Option<i64>,
) -> CliResult<String> {
    let records = match order_id {
        Some(id) => db.sales().list_by_order(id).await?,
        None => db.sales().list_recent(limit).await?,
    };
    Ok(render_history(&records, config))
}

pub fn render_history(records: &[SaleRecord], config: &AppConfig) -> String {
    if records.is_empty() {
        return "No sales recorded.\n".to_string();
    }

    let money = |paise: i64| config.format_currency(Money::from_paise(paise).to_decimal());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<17} {:>6} {:<16} {:<28} {:>5} {:>8} {:>12} {:>12}",
        "RECORDED", "ORDER", "INVOICE", "PRODUCT", "QTY", "VOLUME", "GST", "TOTAL"
    );

    let mut total = 0;
    for record in records {
        total += record.total_paise;
        let _ = writeln!(
            out,
            "{:<17} {:>6} {:<16} {:<28} {:>5} {:>7}L {:>12} {:>12}",
            record.recorded_at.format("%Y-%m-%d %H:%M"),
            record.order_id,
            record.invoice_no,
            record.product_name,
            record.quantity_sold,
            Decimal::new(record.total_ml, 3).normalize(),
            money(record.gst_paise),
            money(record.total_paise),
        );
    }

    let _ = writeln!(out, "{} line(s), {}", records.len(), money(total));
    out
}
