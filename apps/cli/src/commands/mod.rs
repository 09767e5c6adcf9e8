//! # Commands Module
//!
//! One module per subcommand group. Each returns the text to print so the
//! flows can be tested without capturing stdout.
//!
//! ```text
//! dispatch products [QUERY]        → product::list_products
//! dispatch quote --item SKU=QTY    → cart::stage_items + cart::render_quote
//! dispatch bill  --item .. --name  → checkout::submit_order
//! dispatch invoice ORDER_ID        → invoice::redownload_invoice
//! dispatch history                 → history::show_history
//! ```

pub mod cart;
pub mod checkout;
pub mod history;
pub mod invoice;
pub mod product;
