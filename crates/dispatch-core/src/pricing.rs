//! # Pricing Module
//!
//! The discount/GST cascade applied to one product line.
//!
//! ## The Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DP 100.00 × qty 2, bill 10%, cash 5%, GST 18%                          │
//! │                                                                         │
//! │  base           = dp × qty                      200.00                  │
//! │  bill_discount  = base × bill%                   20.00                  │
//! │  after_bill     = base − bill_discount          180.00                  │
//! │  cash_discount  = after_bill × cd%                9.00                  │
//! │  taxable        = after_bill − cash_discount    171.00                  │
//! │  gst            = taxable × gst%                 30.78                  │
//! │  total          = taxable + gst                 201.78                  │
//! │                                                                         │
//! │  Each step feeds the next. Values stay exact (Decimal) until they are   │
//! │  displayed or put on the wire.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{round_money, Money, Rate};

// =============================================================================
// Price Terms
// =============================================================================

/// Everything about a product that the cascade needs.
///
/// Frozen into each cart line when the product is staged, so a catalog
/// update after staging does not change a quote in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTerms {
    /// Dealer price per unit.
    pub dp: Money,

    /// Primary discount, applied to the base value.
    pub bill_discount: Rate,

    /// Cash discount, applied after the bill discount.
    pub cash_discount: Rate,

    /// GST, applied to the discounted value.
    pub gst: Rate,

    /// Volume of one unit (can) in millilitres.
    pub ml_per_unit: i64,
}

impl PriceTerms {
    /// Runs the cascade for `quantity` units.
    ///
    /// Quantity is not validated here; callers stage lines through
    /// [`crate::cart::Cart::add`], which rejects non-positive quantities.
    pub fn price(&self, quantity: i64) -> LineBreakdown {
        let qty = Decimal::from(quantity);

        let base = self.dp.to_decimal() * qty;
        let bill_discount = self.bill_discount.of(base);
        let after_bill = base - bill_discount;
        let cash_discount = self.cash_discount.of(after_bill);
        let taxable = after_bill - cash_discount;
        let gst = self.gst.of(taxable);
        let total = taxable + gst;

        LineBreakdown {
            quantity,
            base,
            bill_discount,
            after_bill,
            cash_discount,
            taxable,
            gst,
            total,
            volume_ml: self.ml_per_unit.saturating_mul(quantity),
        }
    }
}

// =============================================================================
// Line Breakdown
// =============================================================================

/// Result of the cascade for one line. All amounts are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakdown {
    pub quantity: i64,
    pub base: Decimal,
    pub bill_discount: Decimal,
    pub after_bill: Decimal,
    pub cash_discount: Decimal,
    pub taxable: Decimal,
    pub gst: Decimal,
    pub total: Decimal,
    pub volume_ml: i64,
}

impl LineBreakdown {
    /// Bill discount plus cash discount.
    pub fn discount(&self) -> Decimal {
        self.bill_discount + self.cash_discount
    }

    /// Taxable value per unit, unrounded. Zero for a zero quantity.
    pub fn unit_rate(&self) -> Decimal {
        if self.quantity == 0 {
            return Decimal::ZERO;
        }
        self.taxable / Decimal::from(self.quantity)
    }

    /// Unit rate as submitted on the invoice line (2 dp).
    pub fn submitted_rate(&self) -> Decimal {
        round_money(self.unit_rate())
    }

    /// Taxable amount as submitted on the invoice line (2 dp).
    pub fn submitted_amount(&self) -> Decimal {
        round_money(self.taxable)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(dp_paise: i64, bill_bps: u32, cd_bps: u32, gst_bps: u32) -> PriceTerms {
        PriceTerms {
            dp: Money::from_paise(dp_paise),
            bill_discount: Rate::from_bps(bill_bps),
            cash_discount: Rate::from_bps(cd_bps),
            gst: Rate::from_bps(gst_bps),
            ml_per_unit: 4000,
        }
    }

    #[test]
    fn test_worked_example() {
        let line = terms(10_000, 1000, 500, 1800).price(2);

        assert_eq!(line.base, Decimal::from(200));
        assert_eq!(line.bill_discount, Decimal::from(20));
        assert_eq!(line.after_bill, Decimal::from(180));
        assert_eq!(line.cash_discount, Decimal::from(9));
        assert_eq!(line.taxable, Decimal::from(171));
        assert_eq!(line.gst, Decimal::new(3078, 2));
        assert_eq!(line.total, Decimal::new(20178, 2));
        assert_eq!(line.volume_ml, 8000);
    }

    #[test]
    fn test_total_identity_holds() {
        let cases = [
            (99_900, 1250, 300, 1800, 7),
            (45_050, 0, 0, 1200, 1),
            (1, 999, 1, 2800, 13),
            (250_000, 2500, 250, 500, 40),
        ];

        for (dp, bill, cd, gst, qty) in cases {
            let t = terms(dp, bill, cd, gst);
            let line = t.price(qty);
            let taxable = line.base - line.bill_discount - line.cash_discount;

            assert_eq!(line.taxable, taxable);
            assert_eq!(line.gst, t.gst.of(taxable));
            assert_eq!(line.total, line.base - line.bill_discount - line.cash_discount + line.gst);
        }
    }

    #[test]
    fn test_no_intermediate_rounding() {
        // 0.99 × 1, 2.5% cash discount leaves 0.96525 taxable
        let line = terms(99, 0, 250, 1800).price(1);
        assert_eq!(line.taxable, Decimal::new(96_525, 5));
        assert_eq!(line.gst, Decimal::new(1_737_450, 7));
        assert_eq!(line.submitted_amount(), Decimal::new(97, 2));
    }

    #[test]
    fn test_discount_sum() {
        let line = terms(10_000, 1000, 500, 1800).price(2);
        assert_eq!(line.discount(), Decimal::from(29));
    }

    #[test]
    fn test_submitted_rate_is_rounded_per_unit() {
        // taxable 171 over 2 units = 85.5
        let line = terms(10_000, 1000, 500, 1800).price(2);
        assert_eq!(line.submitted_rate(), Decimal::new(855, 1));

        // 66.67% off 300 leaves 99.99 over 3 units = 33.33
        let line = terms(10_000, 6667, 0, 0).price(3);
        assert_eq!(line.taxable, Decimal::new(99_990, 3));
        assert_eq!(line.submitted_rate(), Decimal::new(3333, 2));
    }

    #[test]
    fn test_zero_quantity_rate() {
        let line = terms(10_000, 0, 0, 1800).price(0);
        assert_eq!(line.unit_rate(), Decimal::ZERO);
        assert_eq!(line.total, Decimal::ZERO);
    }
}
