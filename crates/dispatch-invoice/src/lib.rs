//! # dispatch-invoice: Invoicing Backend Client
//!
//! Talks to the external invoicing service that owns orders, invoice
//! numbering and PDF rendering.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/orders/                      {customer, items} → {order_id}  │
//! │  POST /api/generate-invoice/{id}/[?email=1]        → invoice metadata   │
//! │  GET  /api/generate-invoice/{id}/                  → existing metadata  │
//! │  GET  /api/invoice/{id}/pdf/                       → PDF bytes          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calls are made once. Nothing is retried and no request timeout is set.

pub mod client;
pub mod error;
pub mod wire;

pub use client::{invoice_pdf_file_name, HttpInvoiceClient, InvoiceApi};
pub use error::{extract_error_message, InvoiceApiError, InvoiceResult};
pub use wire::{InvoiceMeta, OrderCreated, OrderPayload};

/// Backend address used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Strips trailing slashes so paths can be appended verbatim.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
