//! # Validation Module
//!
//! Input validation for operator-typed values and catalog data.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                   │
//! │  ├── Types and shapes (`SKU=QTY`, integers)                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Quantities, customer fields, catalog terms                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Invoicing backend                                             │
//! │  └── Field errors come back as `{field: [messages]}`                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Customer fields are free text: only the name and the resolved state code
//! must be non-blank. Length and format are the backend's business.

use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Letters, digits, hyphens, underscores only
///
/// ```rust
/// use dispatch_core::validation::validate_sku;
///
/// assert!(validate_sku("APEX-20L").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("has space").is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(required("sku"));
    }

    if sku.len() > 50 {
        return Err(too_long("sku", 50));
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name (1-256 characters).
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(required("name"));
    }

    if name.chars().count() > 256 {
        return Err(too_long("name", 256));
    }

    Ok(())
}

/// Validates the customer name printed after "Sri.". Required, otherwise free.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(required("customer name"));
    }
    Ok(())
}

/// Validates a GST state code such as `37`. Required, otherwise free.
pub fn validate_state_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(required("state code"));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a staged quantity.
///
/// ## User Workflow
/// ```text
/// Operator enters quantity: 5
///      │
///      ▼
/// validate_quantity(5) ← THIS FUNCTION
///      │
///      ├── qty <= 0? → Error: "quantity must be positive"
///      ├── qty > MAX_LINE_QUANTITY? → Error: out of range
///      │
///      └── OK → stock check in Cart::add
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a dealer price in paise (zero allowed).
pub fn validate_price_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "dp".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates on-hand stock (zero allowed).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage term in basis points (0-100%).
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates a per-unit volume in millilitres.
pub fn validate_volume_ml(ml: i64) -> ValidationResult<()> {
    if ml <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "volume".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more line fits in the cart.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn too_long(field: &str, max: usize) -> ValidationError {
    ValidationError::TooLong {
        field: field.to_string(),
        max,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
