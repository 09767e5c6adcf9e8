//! # dispatch-core: Pure Business Logic for the Dispatch Terminal
//!
//! This crate holds everything the billing screen computes: the
//! discount/GST cascade, cart merge rules, the wire form of order lines,
//! the CGST/SGST/IGST split and the amount-in-words line. It has zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dispatch Terminal Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     apps/cli (`dispatch`)                       │    │
//! │  │      products ──► quote ──► bill ──► invoice ──► history        │    │
//! │  └──────────────┬──────────────────┬───────────────────┬───────────┘    │
//! │                 │                  │                   │                │
//! │  ┌──────────────▼──────────────────▼───┐   ┌───────────▼────────────┐   │
//! │  │     ★ dispatch-core (THIS CRATE) ★  │   │   dispatch-invoice     │   │
//! │  │                                     │   │   (HTTP to backend)    │   │
//! │  │  money   pricing   cart   tax       │   └────────────────────────┘   │
//! │  │  words   types     validation       │   ┌────────────────────────┐   │
//! │  │                                     │   │   dispatch-db          │   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK  │   │   (catalog, history)   │   │
//! │  └─────────────────────────────────────┘   └────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` (integer paise) and `Rate` (basis points)
//! - [`pricing`] - The bill discount → cash discount → GST cascade
//! - [`cart`] - Cart lines, merging, totals, wire order items
//! - [`tax`] - CGST/SGST vs IGST presentation of the GST total
//! - [`words`] - Amount in words, Indian numbering
//! - [`types`] - Product, customer, order item, sale record
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use dispatch_core::money::{Money, Rate};
//! use dispatch_core::pricing::PriceTerms;
//! use rust_decimal::Decimal;
//!
//! let terms = PriceTerms {
//!     dp: Money::from_paise(10_000),
//!     bill_discount: Rate::from_bps(1000),
//!     cash_discount: Rate::from_bps(500),
//!     gst: Rate::from_bps(1800),
//!     ml_per_unit: 1000,
//! };
//!
//! let line = terms.price(2);
//! assert_eq!(line.total, Decimal::new(20178, 2)); // 201.78
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod tax;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use pricing::{LineBreakdown, PriceTerms};
pub use tax::{GstSplit, SupplyKind};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// State code of the shop issuing invoices (Andhra Pradesh).
///
/// Customers with the same code are billed intra-state (CGST + SGST),
/// everyone else inter-state (IGST).
pub const SHOP_STATE_CODE: &str = "37";

/// State code assumed when the operator leaves the field blank.
pub const DEFAULT_STATE_CODE: &str = SHOP_STATE_CODE;

/// HSN/SAC classification printed on every invoice line.
pub const DEFAULT_HSN_SAC: &str = "998313";

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum units on one cart line, after merging.
pub const MAX_LINE_QUANTITY: i64 = 1_000_000;
