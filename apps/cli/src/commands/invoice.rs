//! # Invoice Commands
//!
//! Saving invoice PDFs to disk, both at the end of a checkout and for
//! invoices issued earlier (`dispatch invoice <ORDER_ID>`).

use std::path::{Path, PathBuf};

use dispatch_invoice::{invoice_pdf_file_name, InvoiceApi, InvoiceMeta};
use tracing::info;

use crate::error::{CheckoutError, CliResult};
use crate::state::AppConfig;

/// Downloads the PDF for `order_id` and writes it to `dir` as
/// `invoice_<invoice_no with '-' → '_'>.pdf`. An existing file is replaced.
/// The file always lands directly in `dir`, whatever the invoice number holds.
pub async fn save_invoice_pdf(
    api: &dyn InvoiceApi,
    order_id: i64,
    invoice_no: &str,
    dir: &Path,
) -> Result<PathBuf, CheckoutError> {
    let pdf = api
        .fetch_invoice_pdf(order_id)
        .await
        .map_err(|source| CheckoutError::Download {
            order_id,
            invoice_no: invoice_no.to_string(),
            source,
        })?;

    let path = dir.join(invoice_pdf_file_name(invoice_no));
    let save_error = |source| CheckoutError::SavePdf {
        order_id,
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(dir).await.map_err(save_error)?;
    tokio::fs::write(&path, &pdf).await.map_err(save_error)?;

    info!(order_id, path = %path.display(), bytes = pdf.len(), "Invoice PDF saved");
    Ok(path)
}

/// Looks up an issued invoice and saves its PDF again.
///
/// Returns the line printed to the operator.
pub async fn redownload_invoice(
    api: &dyn InvoiceApi,
    config: &AppConfig,
    order_id: i64,
    output_dir: Option<&Path>,
) -> CliResult<String> {
    let meta: InvoiceMeta = api.get_invoice(order_id).await?;
    let dir = output_dir.unwrap_or(&config.output_dir);

    let path = save_invoice_pdf(api, order_id, &meta.invoice_no, dir).await?;
    Ok(format!(
        "Invoice {} ({}) for order {} saved to {}\n",
        meta.invoice_no,
        meta.invoice_date,
        order_id,
        path.display()
    ))
}
