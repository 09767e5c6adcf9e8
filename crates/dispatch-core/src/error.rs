//! # Error Types
//!
//! Domain-specific error types for dispatch-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  dispatch-core errors (this file)                                       │
//! │  ├── CoreError        - Cart and catalog rule violations                │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  dispatch-db errors       └── DbError                                   │
//! │  dispatch-invoice errors  └── InvoiceApiError                           │
//! │  apps/cli errors          └── CheckoutError, CliError                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → operator message        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with the given SKU or ID.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is no longer offered.
    #[error("Product {0} is not available for dispatch")]
    ProductInactive(String),

    /// Requested quantity exceeds the on-hand stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Stage For Dispatch (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: on hand = 3
    ///      │
    ///      ▼
    /// InsufficientStock { sku: "APEX-20L", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Cart unchanged, operator sees the message
    /// ```
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Removal of a product that is not staged.
    #[error("Product {0} not in cart")]
    NotInCart(String),

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed SKU or email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
