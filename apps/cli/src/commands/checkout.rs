//! # Checkout Command
//!
//! Order submission against the invoicing backend.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Cart non-empty, customer name non-blank      ─► EmptyCart / Missing │
//! │  2. Claim the in-progress flag                   ─► InProgress          │
//! │  3. POST /api/orders/                            ─► order_id            │
//! │  4. POST /api/generate-invoice/{order_id}/       ─► invoice_no          │
//! │  5. Append one SaleRecord per cart line (one transaction)               │
//! │  6. Clear the cart                                                      │
//! │  7. GET /api/invoice/{order_id}/pdf/ ─► invoice_<no>.pdf in output dir  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first failing step ends the flow. Nothing is retried or rolled back:
//! a failure at 3 or 4 leaves the cart as it was, a failure at 7 happens
//! after the order exists and the cart is empty.

use std::fmt::Write;
use std::path::PathBuf;

use chrono::Utc;
use dispatch_core::{CartTotals, CustomerDetails, SaleRecord};
use dispatch_db::Database;
use dispatch_invoice::{InvoiceApi, OrderPayload};
use tracing::{error, info};

use crate::commands::invoice::save_invoice_pdf;
use crate::error::CheckoutError;
use crate::state::{AppConfig, CartState, CheckoutState};

/// What the operator entered for one submission.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub customer: CustomerDetails,
    pub email_invoice: bool,
    /// Overrides the configured output directory.
    pub output_dir: Option<PathBuf>,
}

/// Outcome of a completed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub order_id: i64,
    pub invoice_no: String,
    pub invoice_date: String,
    pub totals: CartTotals,
    pub emailed: bool,
    pub pdf_path: PathBuf,
}

/// Submits the cart as an order and saves the invoice PDF.
pub async fn submit_order(
    api: &dyn InvoiceApi,
    db: &Database,
    cart: &CartState,
    checkout: &CheckoutState,
    config: &AppConfig,
    request: CheckoutRequest,
) -> Result<CheckoutReceipt, CheckoutError> {
    if cart.with_cart(|c| c.is_empty()) {
        return Err(CheckoutError::EmptyCart);
    }
    if request.customer.name.trim().is_empty() {
        return Err(CheckoutError::MissingCustomerName);
    }

    let _guard = checkout.try_begin().ok_or(CheckoutError::InProgress)?;

    let customer = request.customer.into_customer(&config.default_state_code)?;
    let (lines, items, totals) = cart.with_cart(|c| {
        (c.lines().to_vec(), c.order_items(&config.hsn_sac), c.totals())
    });

    let created = api.create_order(&OrderPayload { customer, items }).await?;
    let order_id = created.order_id;

    let meta = api.generate_invoice(order_id, request.email_invoice).await?;

    let recorded_at = Utc::now();
    let records: Vec<SaleRecord> = lines
        .iter()
        .map(|line| SaleRecord::from_line(line, order_id, &meta.invoice_no, recorded_at))
        .collect();

    if let Err(source) = db.sales().append(&records).await {
        error!(order_id, invoice_no = %meta.invoice_no, error = %source, "Failed to record sales history");
        return Err(CheckoutError::History {
            order_id,
            invoice_no: meta.invoice_no,
            source,
        });
    }

    cart.with_cart_mut(|c| c.clear());

    let dir = request
        .output_dir
        .unwrap_or_else(|| config.output_dir.clone());
    let pdf_path = save_invoice_pdf(api, order_id, &meta.invoice_no, &dir).await?;

    info!(
        order_id,
        invoice_no = %meta.invoice_no,
        lines = records.len(),
        "Order dispatched"
    );

    Ok(CheckoutReceipt {
        order_id,
        invoice_no: meta.invoice_no,
        invoice_date: meta.invoice_date,
        totals,
        emailed: request.email_invoice,
        pdf_path,
    })
}

/// Summary printed after a successful `bill`.
pub fn render_receipt(receipt: &CheckoutReceipt, config: &AppConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order {} created", receipt.order_id);
    let _ = writeln!(
        out,
        "Invoice {} dated {}",
        receipt.invoice_no, receipt.invoice_date
    );
    let _ = writeln!(
        out,
        "{} line(s), {} unit(s), {} L",
        receipt.totals.line_count,
        receipt.totals.total_quantity,
        receipt.totals.total_litres().normalize()
    );
    let _ = writeln!(
        out,
        "Total payable {}",
        config.format_currency(receipt.totals.payable())
    );
    if receipt.emailed {
        let _ = writeln!(out, "Invoice emailed to the customer");
    }
    let _ = writeln!(out, "PDF saved to {}", receipt.pdf_path.display());
    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ItemArg;
    use crate::commands::cart::stage_items;
    use crate::test_support::{catalog, config_for};
    use dispatch_invoice::{HttpInvoiceClient, InvoiceApiError};
    use httpmock::prelude::*;
    use serde_json::json;

    struct Fixture {
        db: Database,
        cart: CartState,
        checkout: CheckoutState,
        config: AppConfig,
        api: HttpInvoiceClient,
        dir: tempfile::TempDir,
    }

    async fn fixture(base_url: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let db = catalog().await;
        let cart = CartState::new();
        let item: ItemArg = "APEX-20L=2".parse().unwrap();
        stage_items(&db, &cart, &[item]).await.unwrap();

        Fixture {
            config: config_for(base_url, dir.path()),
            api: HttpInvoiceClient::new(base_url).unwrap(),
            checkout: CheckoutState::new(),
            db,
            cart,
            dir,
        }
    }

    fn request(name: &str) -> CheckoutRequest {
        CheckoutRequest {
            customer: CustomerDetails {
                name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn submit(f: &Fixture, request: CheckoutRequest) -> Result<CheckoutReceipt, CheckoutError> {
        submit_order(&f.api, &f.db, &f.cart, &f.checkout, &f.config, request).await
    }

    fn mock_invoice(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(POST).path("/api/generate-invoice/42/");
            then.status(201).json_body(json!({
                "invoice_no": "SP-2026-0042",
                "invoice_date": "2026-10-18",
                "order_id": 42,
                "pdf_url": null
            }));
        })
    }

    #[tokio::test]
    async fn test_successful_checkout() {
        let server = MockServer::start();
        let f = fixture(&server.base_url()).await;

        let order = server.mock(|when, then| {
            when.method(POST).path("/api/orders/").json_body(json!({
                "customer": { "name": "Ravi Kumar", "state_code": "37" },
                "items": [{
                    "sno": 1,
                    "description": "Apex Ultima 20L",
                    "hsn_sac": "998313",
                    "quantity": 2,
                    "rate": 85.5,
                    "amount": 171.0
                }]
            }));
            then.status(201).json_body(json!({ "order_id": 42 }));
        });
        let invoice = mock_invoice(&server);
        let pdf = server.mock(|when, then| {
            when.method(GET).path("/api/invoice/42/pdf/");
            then.status(200).body(b"%PDF-1.4 dispatch".to_vec());
        });

        let receipt = submit(&f, request("  Ravi Kumar ")).await.unwrap();

        order.assert();
        invoice.assert();
        pdf.assert();

        assert_eq!(receipt.order_id, 42);
        assert_eq!(receipt.invoice_no, "SP-2026-0042");
        assert_eq!(receipt.pdf_path, f.dir.path().join("invoice_SP_2026_0042.pdf"));
        assert_eq!(std::fs::read(&receipt.pdf_path).unwrap(), b"%PDF-1.4 dispatch");

        assert!(f.cart.with_cart(|c| c.is_empty()));
        assert!(!f.checkout.is_in_progress());

        let history = f.db.sales().list_by_order(42).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].invoice_no, "SP-2026-0042");
        assert_eq!(history[0].quantity_sold, 2);
        assert_eq!(history[0].total_paise, 20178);

        let text = render_receipt(&receipt, &f.config);
        assert!(text.contains("Order 42 created"));
        assert!(text.contains("Total payable ₹202.00"));
        assert!(!text.contains("emailed"));
    }

    #[tokio::test]
    async fn test_order_failure_keeps_cart_and_skips_invoice() {
        let server = MockServer::start();
        let f = fixture(&server.base_url()).await;

        server.mock(|when, then| {
            when.method(POST).path("/api/orders/");
            then.status(400)
                .json_body(json!({ "customer": { "name": ["This field may not be blank."] }, "items": ["Invalid."] }));
        });
        let invoice = mock_invoice(&server);

        let err = submit(&f, request("Ravi Kumar")).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Api(InvoiceApiError::Api { status: 400, .. })));
        assert_eq!(err.to_string(), "items: Invalid.");
        invoice.assert_hits(0);
        assert_eq!(f.cart.with_cart(|c| c.len()), 1);
        assert_eq!(f.db.sales().count().await.unwrap(), 0);
        assert!(!f.checkout.is_in_progress());
    }

    #[tokio::test]
    async fn test_invoice_failure_keeps_cart() {
        let server = MockServer::start();
        let f = fixture(&server.base_url()).await;

        server.mock(|when, then| {
            when.method(POST).path("/api/orders/");
            then.status(201).json_body(json!({ "order_id": 42 }));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/generate-invoice/42/");
            then.status(500).body("<html>Server Error</html>");
        });

        let err = submit(&f, request("Ravi Kumar")).await.unwrap_err();

        assert_eq!(err.to_string(), "API error: 500");
        assert_eq!(f.cart.with_cart(|c| c.len()), 1);
        assert_eq!(f.db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_pdf_failure_after_cart_cleared() {
        let server = MockServer::start();
        let f = fixture(&server.base_url()).await;

        server.mock(|when, then| {
            when.method(POST).path("/api/orders/");
            then.status(201).json_body(json!({ "order_id": 42 }));
        });
        let _invoice = mock_invoice(&server);
        server.mock(|when, then| {
            when.method(GET).path("/api/invoice/42/pdf/");
            then.status(404);
        });

        let err = submit(&f, request("Ravi Kumar")).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Download { order_id: 42, .. }));
        assert!(err.to_string().starts_with("Failed to fetch PDF"));
        assert!(f.cart.with_cart(|c| c.is_empty()));
        assert_eq!(f.db.sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_flag_is_forwarded() {
        let server = MockServer::start();
        let f = fixture(&server.base_url()).await;

        server.mock(|when, then| {
            when.method(POST).path("/api/orders/");
            then.status(201).json_body(json!({ "order_id": 42 }));
        });
        let invoice = server.mock(|when, then| {
            when.method(POST)
                .path("/api/generate-invoice/42/")
                .query_param("email", "1");
            then.status(201).json_body(json!({
                "invoice_no": "SP-2026-0042",
                "invoice_date": "2026-10-18",
                "order_id": 42
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/invoice/42/pdf/");
            then.status(200).body(b"%PDF".to_vec());
        });

        let mut req = request("Ravi Kumar");
        req.customer.email = "ravi@example.in".to_string();
        req.email_invoice = true;

        let receipt = submit(&f, req).await.unwrap();
        invoice.assert();
        assert!(render_receipt(&receipt, &f.config).contains("Invoice emailed to the customer"));
    }

    #[tokio::test]
    async fn test_history_failure_keeps_cart() {
        let server = MockServer::start();
        let f = fixture(&server.base_url()).await;

        let order = server.mock(|when, then| {
            when.method(POST).path("/api/orders/");
            then.status(201).json_body(json!({ "order_id": 42 }));
        });
        let invoice = mock_invoice(&server);
        let pdf = server.mock(|when, then| {
            when.method(GET).path("/api/invoice/42/pdf/");
            then.status(200).body(b"%PDF".to_vec());
        });

        f.db.close().await;
        let err = submit(&f, request("Ravi Kumar")).await.unwrap_err();

        order.assert();
        invoice.assert();
        pdf.assert_hits(0);

        assert!(matches!(
            err,
            CheckoutError::History { order_id: 42, ref invoice_no, .. } if invoice_no == "SP-2026-0042"
        ));
        assert_eq!(f.cart.with_cart(|c| c.len()), 1);
        assert!(!f.checkout.is_in_progress());
        assert!(!f.dir.path().join("invoice_SP_2026_0042.pdf").exists());
    }

    #[tokio::test]
    async fn test_rejected_before_any_request() {
        let server = MockServer::start();
        let mut f = fixture(&server.base_url()).await;
        let order = server.mock(|when, then| {
            when.method(POST).path("/api/orders/");
            then.status(201).json_body(json!({ "order_id": 1 }));
        });

        let err = submit(&f, request("   ")).await.unwrap_err();
        assert!(matches!(err, CheckoutError::MissingCustomerName));

        f.config.default_state_code = " ".to_string();
        let err = submit(&f, request("Ravi Kumar")).await.unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidCustomer(_)));
        assert!(!f.checkout.is_in_progress());
        f.config.default_state_code = "37".to_string();

        let guard = f.checkout.try_begin().unwrap();
        let err = submit(&f, request("Ravi Kumar")).await.unwrap_err();
        assert!(matches!(err, CheckoutError::InProgress));
        drop(guard);

        f.cart.with_cart_mut(|c| c.clear());
        let err = submit(&f, request("Ravi Kumar")).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));

        order.assert_hits(0);
    }
}
