//! # Invoice Client
//!
//! [`InvoiceApi`] is the seam the checkout flow depends on;
//! [`HttpInvoiceClient`] is the reqwest implementation.
//!
//! ## Checkout Sequence
//! ```text
//!  terminal                                   invoicing backend
//!     │  POST /api/orders/ {customer, items}         │
//!     │─────────────────────────────────────────────►│
//!     │◄───────────────────────── 201 {order_id} ────│
//!     │  POST /api/generate-invoice/{id}/            │
//!     │─────────────────────────────────────────────►│
//!     │◄──────────── 201 {invoice_no, pdf_url, ..} ──│
//!     │  GET /api/invoice/{id}/pdf/                  │
//!     │─────────────────────────────────────────────►│
//!     │◄────────────────────────── 200 %PDF-1.4 ... ─│
//! ```

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{extract_error_message, InvoiceApiError, InvoiceResult};
use crate::normalize_base_url;
use crate::wire::{InvoiceMeta, OrderCreated, OrderPayload};

/// Operations the terminal needs from the invoicing backend.
#[async_trait]
pub trait InvoiceApi: Send + Sync {
    /// Base URL without a trailing slash, shown in error hints.
    fn base_url(&self) -> &str;

    /// Creates an order and returns its id.
    async fn create_order(&self, payload: &OrderPayload) -> InvoiceResult<OrderCreated>;

    /// Issues (or returns the already issued) invoice for an order.
    async fn generate_invoice(&self, order_id: i64, email: bool) -> InvoiceResult<InvoiceMeta>;

    /// Reads metadata of an existing invoice.
    async fn get_invoice(&self, order_id: i64) -> InvoiceResult<InvoiceMeta>;

    /// Downloads the rendered invoice PDF.
    async fn fetch_invoice_pdf(&self, order_id: i64) -> InvoiceResult<Bytes>;
}

/// File name the PDF is saved under: `SP-2026-0042` → `invoice_SP_2026_0042.pdf`.
///
/// Path separators and control characters become `_` as well, so the
/// result is always a single path component.
pub fn invoice_pdf_file_name(invoice_no: &str) -> String {
    let safe: String = invoice_no
        .chars()
        .map(|c| match c {
            '-' | '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("invoice_{safe}.pdf")
}

/// reqwest-backed [`InvoiceApi`].
#[derive(Debug, Clone)]
pub struct HttpInvoiceClient {
    http: Client,
    base_url: String,
}

impl HttpInvoiceClient {
    /// Builds a client for `base_url`. A trailing slash is dropped.
    pub fn new(base_url: &str) -> InvoiceResult<Self> {
        let http = Client::builder().build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Uses an already configured reqwest client.
    pub fn with_client(http: Client, base_url: &str) -> Self {
        HttpInvoiceClient {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of the PDF download for an order.
    pub fn invoice_pdf_url(&self, order_id: i64) -> String {
        self.url(&format!("/api/invoice/{order_id}/pdf/"))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> InvoiceResult<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = extract_error_message(status.as_u16(), &body);
            warn!(status = status.as_u16(), %message, "Invoice backend returned an error");
            return Err(InvoiceApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| InvoiceApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl InvoiceApi for HttpInvoiceClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn create_order(&self, payload: &OrderPayload) -> InvoiceResult<OrderCreated> {
        debug!(items = payload.items.len(), "Creating order");

        let response = self
            .http
            .post(self.url("/api/orders/"))
            .json(payload)
            .send()
            .await?;

        let created: OrderCreated = Self::read_json(response).await?;
        info!(order_id = created.order_id, "Order created");
        Ok(created)
    }

    async fn generate_invoice(&self, order_id: i64, email: bool) -> InvoiceResult<InvoiceMeta> {
        debug!(order_id, email, "Generating invoice");

        let mut url = self.url(&format!("/api/generate-invoice/{order_id}/"));
        if email {
            url.push_str("?email=1");
        }

        let response = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let meta: InvoiceMeta = Self::read_json(response).await?;
        info!(order_id, invoice_no = %meta.invoice_no, "Invoice generated");
        Ok(meta)
    }

    async fn get_invoice(&self, order_id: i64) -> InvoiceResult<InvoiceMeta> {
        let response = self
            .http
            .get(self.url(&format!("/api/generate-invoice/{order_id}/")))
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn fetch_invoice_pdf(&self, order_id: i64) -> InvoiceResult<Bytes> {
        let response = self.http.get(self.invoice_pdf_url(order_id)).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(order_id, status = status.as_u16(), "PDF download failed");
            return Err(InvoiceApiError::PdfFetch {
                status: status.as_u16(),
            });
        }

        let pdf = response.bytes().await?;
        debug!(order_id, bytes = pdf.len(), "PDF downloaded");
        Ok(pdf)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
