//! # Terminal Errors
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ─► CoreError ──┐                                       │
//! │  sqlx::Error ─────► DbError ────┤                                       │
//! │  reqwest::Error ──► InvoiceApiError ─► CheckoutError ─┐                 │
//! │  config::ConfigError ─► ConfigError ──┐               │                 │
//! │                                       ▼               ▼                 │
//! │                                   CliError ──► "Error: {msg}"           │
//! │                                                 (+ backend hint)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The operator sees each error's `Display`. Failures of `bill` and
//! `invoice`, the commands that talk to the invoicing backend, are followed
//! by a hint naming the configured URL.

use std::path::PathBuf;

use dispatch_core::{CoreError, ValidationError};
use dispatch_db::DbError;
use dispatch_invoice::InvoiceApiError;
use thiserror::Error;

use crate::state::ConfigError;

/// Failures of the order submission and invoice download flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Customer name is required")]
    MissingCustomerName,

    #[error("An order submission is already in progress")]
    InProgress,

    #[error("Invalid customer details: {0}")]
    InvalidCustomer(#[from] ValidationError),

    /// Order creation or invoice generation failed. Nothing was recorded
    /// locally and the cart is intact.
    #[error(transparent)]
    Api(#[from] InvoiceApiError),

    /// The backend issued the invoice but the local log could not be written.
    #[error("Invoice {invoice_no} was issued for order {order_id} but the sales history could not be saved: {source}")]
    History {
        order_id: i64,
        invoice_no: String,
        #[source]
        source: DbError,
    },

    /// The order exists and the cart was cleared; only the PDF is missing.
    #[error("{source} (invoice {invoice_no}, order {order_id}; run `dispatch invoice {order_id}` to retry)")]
    Download {
        order_id: i64,
        invoice_no: String,
        #[source]
        source: InvoiceApiError,
    },

    #[error("Could not save {}: {source} (run `dispatch invoice {order_id}` to retry)", .path.display())]
    SavePdf {
        order_id: i64,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error of a `dispatch` invocation.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Invoice(#[from] InvoiceApiError),
}

impl CliError {
    /// Text printed to the operator.
    ///
    /// ```text
    /// Error: Order has no items
    ///
    /// Ensure the invoice backend is running at http://127.0.0.1:8000
    /// ```
    pub fn user_message(&self, base_url: &str) -> String {
        if matches!(self, CliError::Checkout(_) | CliError::Invoice(_)) {
            format!("Error: {self}\n\nEnsure the invoice backend is running at {base_url}")
        } else {
            format!("Error: {self}")
        }
    }
}

/// Result type for terminal commands.
pub type CliResult<T> = Result<T, CliError>;
