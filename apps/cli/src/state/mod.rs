//! # State Module
//!
//! Separate state types, each command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐  │
//! │  │   DbState    │  │  CartState   │  │CheckoutState │  │  AppConfig  │  │
//! │  │              │  │              │  │              │  │             │  │
//! │  │  Database    │  │  Arc<Mutex<  │  │  in-progress │  │  backend    │  │
//! │  │  (SQLite     │  │    Cart      │  │  flag        │  │  URL, HSN,  │  │
//! │  │   pool)      │  │  >>          │  │  (atomic)    │  │  paths      │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘  │
//! │                                                                         │
//! │  • DbState: pool is internally synchronized                             │
//! │  • CartState: exclusive access through the mutex                        │
//! │  • CheckoutState: one submission at a time                              │
//! │  • AppConfig: read-only after startup                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod checkout;
mod config;
mod db;

pub use cart::CartState;
pub use checkout::{CheckoutGuard, CheckoutState};
pub use config::{AppConfig, ConfigError};
pub use db::DbState;
