//! # dispatch-db: Local Storage for the Dispatch Terminal
//!
//! SQLite access for the product catalog and the sales history log, built
//! on sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Dispatch Data Flow                               │
//! │                                                                         │
//! │  `dispatch bill --item APEX-20L=2`                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                  dispatch-db (THIS CRATE)                       │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │    │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │    │    │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │    │    │
//! │  │   │               │    │ ProductRepo   │    │ 001_catalog  │    │    │
//! │  │   │ SqlitePool    │◄───│ SaleRepo      │    │ 002_sales_   │    │    │
//! │  │   │               │    │               │    │     history  │    │    │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL mode)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use dispatch_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./dispatch.db")).await?;
//! let product = db.products().get_by_sku("APEX-20L").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
