//! # Repository Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                                                                │
//! │       │  db.products().get_by_sku("APEX-20L")                           │
//! │       ▼                                                                 │
//! │  ProductRepository            SaleRepository                            │
//! │  ├── search / list_active     ├── append (one transaction)              │
//! │  ├── get_by_sku               ├── list_recent                           │
//! │  ├── insert                   └── list_by_order                         │
//! │  └── count                                                              │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`ProductRepository`](product::ProductRepository) - catalog reads and seeding
//! - [`SaleRepository`](sale::SaleRepository) - append-only sales history

pub mod product;
pub mod sale;
