//! # Domain Types
//!
//! Core domain types used throughout the dispatch terminal.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Product      │   │    Customer     │   │   OrderItem     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  sku, name      │   │  name (req.)    │   │  sno            │        │
//! │  │  dp_paise       │   │  address?       │   │  description    │        │
//! │  │  bill/cd/gst    │   │  gstin? phone?  │   │  hsn_sac        │        │
//! │  │  ml_per_unit    │   │  email?         │   │  quantity       │        │
//! │  │  stock          │   │  state_code     │   │  rate, amount   │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │   catalog (stored)      wire payload          wire payload (derived)    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │    SaleRecord  (sales history log)      │                            │
//! │  │  one per cart line, after invoicing     │                            │
//! │  └─────────────────────────────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::CartLine;
use crate::error::ValidationError;
use crate::money::{Money, Rate};
use crate::pricing::PriceTerms;
use crate::validation;

// =============================================================================
// Product
// =============================================================================

/// A paint product available for dispatch. Reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier typed by the operator.
    pub sku: String,

    /// Display name, also the invoice line description.
    pub name: String,

    /// Dealer price per unit, in paise.
    pub dp_paise: i64,

    /// Volume of one unit (can) in millilitres.
    pub ml_per_unit: i64,

    /// Bill discount in basis points.
    pub bill_discount_bps: u32,

    /// Cash discount in basis points.
    pub cash_discount_bps: u32,

    /// GST rate in basis points.
    pub gst_bps: u32,

    /// Units on hand.
    pub stock: i64,

    /// Whether the product is still offered (soft delete).
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the dealer price as Money.
    #[inline]
    pub fn dp(&self) -> Money {
        Money::from_paise(self.dp_paise)
    }

    /// Returns the pricing terms the cascade runs on.
    pub fn terms(&self) -> PriceTerms {
        PriceTerms {
            dp: self.dp(),
            bill_discount: Rate::from_bps(self.bill_discount_bps),
            cash_discount: Rate::from_bps(self.cash_discount_bps),
            gst: Rate::from_bps(self.gst_bps),
            ml_per_unit: self.ml_per_unit,
        }
    }

    /// Checks whether `quantity` units can be taken from stock.
    pub fn can_supply(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }

    /// Validates catalog fields before the product is stored.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_sku(&self.sku)?;
        validation::validate_product_name(&self.name)?;
        validation::validate_price_paise(self.dp_paise)?;
        validation::validate_volume_ml(self.ml_per_unit)?;
        validation::validate_stock(self.stock)?;
        validation::validate_rate_bps("bill discount", self.bill_discount_bps)?;
        validation::validate_rate_bps("cash discount", self.cash_discount_bps)?;
        validation::validate_rate_bps("gst", self.gst_bps)?;
        Ok(())
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Customer details as typed by the operator, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    pub address: String,
    pub gstin: String,
    pub phone: String,
    pub email: String,
    pub state_code: String,
}

impl CustomerDetails {
    /// Trims every field. The fields are free text; nothing beyond the
    /// required name is checked.
    ///
    /// ## Rules
    /// - Name is required after trimming
    /// - Blank optional fields are dropped (omitted on the wire)
    /// - A blank state code falls back to `default_state_code`
    pub fn into_customer(self, default_state_code: &str) -> Result<Customer, ValidationError> {
        let name = self.name.trim().to_string();
        validation::validate_customer_name(&name)?;

        let state_code = match self.state_code.trim() {
            "" => default_state_code.trim().to_string(),
            code => code.to_string(),
        };
        validation::validate_state_code(&state_code)?;

        Ok(Customer {
            name,
            address: non_blank(&self.address),
            gstin: non_blank(&self.gstin),
            phone: non_blank(&self.phone),
            email: non_blank(&self.email),
            state_code,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Customer block of the order payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub state_code: String,
}

// =============================================================================
// Order Item
// =============================================================================

/// One invoice line as sent to the backend.
///
/// `amount` is the taxable value (after both discounts, before GST); the
/// backend computes tax itself from the sum of amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// 1-based position in the cart.
    pub sno: u32,
    pub description: String,
    pub hsn_sac: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

// =============================================================================
// Sale Record
// =============================================================================

/// One entry in the local sales history log.
///
/// Uses the snapshot pattern: product name and price are frozen at the
/// time of dispatch. Amounts are rounded to paise for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub order_id: i64,
    pub invoice_no: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity_sold: i64,
    pub ml_per_unit: i64,
    pub rate_per_unit_paise: i64,
    pub total_ml: i64,
    pub total_paise: i64,
    pub base_dp_paise: i64,
    pub bill_discount_paise: i64,
    pub cash_discount_paise: i64,
    pub gst_paise: i64,
    pub recorded_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Derives the history entry for a dispatched cart line.
    pub fn from_line(
        line: &CartLine,
        order_id: i64,
        invoice_no: &str,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let totals = line.breakdown();

        SaleRecord {
            id: Uuid::new_v4().to_string(),
            order_id,
            invoice_no: invoice_no.to_string(),
            product_id: line.product_id.clone(),
            product_name: line.name.clone(),
            quantity_sold: line.quantity,
            ml_per_unit: line.terms.ml_per_unit,
            rate_per_unit_paise: line.terms.dp.paise(),
            total_ml: totals.volume_ml,
            total_paise: Money::from_decimal(totals.total).paise(),
            base_dp_paise: Money::from_decimal(totals.base).paise(),
            bill_discount_paise: Money::from_decimal(totals.bill_discount).paise(),
            cash_discount_paise: Money::from_decimal(totals.cash_discount).paise(),
            gst_paise: Money::from_decimal(totals.gst).paise(),
            recorded_at,
        }
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paise(self.total_paise)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
