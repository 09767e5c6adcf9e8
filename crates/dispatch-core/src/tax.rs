//! # GST Split
//!
//! Presents a GST total the way the invoice prints it: CGST + SGST for a
//! customer in the shop's state, IGST for everyone else.
//!
//! ```text
//! customer state == shop state  ──►  CGST = GST/2, SGST = GST/2, IGST = 0
//! anything else (incl. blank)   ──►  CGST = 0,     SGST = 0,     IGST = GST
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::round_money;

/// Whether a supply is within the shop's state or across states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyKind {
    IntraState,
    InterState,
}

impl SupplyKind {
    /// Classifies a customer by state code. Blank codes count as inter-state.
    pub fn for_customer(customer_state_code: &str, shop_state_code: &str) -> Self {
        let code = customer_state_code.trim();
        if !code.is_empty() && code == shop_state_code.trim() {
            SupplyKind::IntraState
        } else {
            SupplyKind::InterState
        }
    }
}

/// GST total split into its printed components, each rounded to paise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GstSplit {
    pub kind: SupplyKind,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub igst: Decimal,
}

impl GstSplit {
    /// Splits `total_gst` for a customer in `customer_state_code`.
    pub fn compute(total_gst: Decimal, customer_state_code: &str, shop_state_code: &str) -> Self {
        match SupplyKind::for_customer(customer_state_code, shop_state_code) {
            SupplyKind::IntraState => {
                let half = round_money(total_gst / Decimal::TWO);
                GstSplit {
                    kind: SupplyKind::IntraState,
                    cgst: half,
                    sgst: half,
                    igst: Decimal::ZERO,
                }
            }
            SupplyKind::InterState => GstSplit {
                kind: SupplyKind::InterState,
                cgst: Decimal::ZERO,
                sgst: Decimal::ZERO,
                igst: round_money(total_gst),
            },
        }
    }

    /// Sum of the printed components.
    pub fn total(&self) -> Decimal {
        self.cgst + self.sgst + self.igst
    }
}
