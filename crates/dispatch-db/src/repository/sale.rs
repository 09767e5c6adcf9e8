//! # Sale Repository
//!
//! The local sales history log. Rows are only ever appended, once per cart
//! line, after the backend has issued an invoice for the order.
//!
//! ```text
//! checkout ──► invoice issued ──► append([SaleRecord; n])  (one transaction)
//!                                        │
//!                    `dispatch history` ◄┘ list_recent / list_by_order
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use dispatch_core::SaleRecord;

const SALE_COLUMNS: &str = r#"
    id,
    order_id,
    invoice_no,
    product_id,
    product_name,
    quantity_sold,
    ml_per_unit,
    rate_per_unit_paise,
    total_ml,
    total_paise,
    base_dp_paise,
    bill_discount_paise,
    cash_discount_paise,
    gst_paise,
    recorded_at
"#;

/// Repository for the sales history log.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Appends all records for one order atomically.
    ///
    /// Either every line of the order is logged or none is.
    pub async fn append(&self, records: &[SaleRecord]) -> DbResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO sales_history (
                    id, order_id, invoice_no, product_id, product_name,
                    quantity_sold, ml_per_unit, rate_per_unit_paise,
                    total_ml, total_paise, base_dp_paise,
                    bill_discount_paise, cash_discount_paise, gst_paise,
                    recorded_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                "#,
            )
            .bind(&record.id)
            .bind(record.order_id)
            .bind(&record.invoice_no)
            .bind(&record.product_id)
            .bind(&record.product_name)
            .bind(record.quantity_sold)
            .bind(record.ml_per_unit)
            .bind(record.rate_per_unit_paise)
            .bind(record.total_ml)
            .bind(record.total_paise)
            .bind(record.base_dp_paise)
            .bind(record.bill_discount_paise)
            .bind(record.cash_discount_paise)
            .bind(record.gst_paise)
            .bind(record.recorded_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(
            count = records.len(),
            order_id = records[0].order_id,
            "Sales history appended"
        );
        Ok(())
    }

    /// Most recent entries first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<SaleRecord>> {
        let sql = format!(
            "SELECT {SALE_COLUMNS} FROM sales_history
             ORDER BY recorded_at DESC, rowid DESC
             LIMIT ?1"
        );

        let records = sqlx::query_as::<_, SaleRecord>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// All lines of one order, in cart order.
    pub async fn list_by_order(&self, order_id: i64) -> DbResult<Vec<SaleRecord>> {
        let sql = format!(
            "SELECT {SALE_COLUMNS} FROM sales_history
             WHERE order_id = ?1
             ORDER BY rowid"
        );

        let records = sqlx::query_as::<_, SaleRecord>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Number of logged lines.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_history")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
