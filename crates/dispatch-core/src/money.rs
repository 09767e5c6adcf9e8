//! # Money Module
//!
//! Provides `Money` for stored and submitted amounts and `Rate` for the
//! percentage terms (bill discount, cash discount, GST) of a product.
//!
//! ## Two Representations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE EACH TYPE LIVES                                                  │
//! │                                                                         │
//! │  Catalog / history (stored):   Money(i64 paise)   Rate(u32 bps)         │
//! │                                     │                  │                │
//! │                                     ▼                  ▼                │
//! │  Pricing cascade (in flight):  rust_decimal::Decimal, exact, unrounded  │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │  Display / submission:         round_money() → 2 dp, half away from 0   │
//! │                                                                         │
//! │  10% of 171.00 = 17.1 exactly, 18% of 171.00 = 30.78 exactly.           │
//! │  Nothing is rounded between the steps of the cascade.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dispatch_core::money::{Money, Rate};
//! use rust_decimal::Decimal;
//!
//! let dp = Money::from_paise(123_450); // ₹1234.50
//! let gst = Rate::from_bps(1800);      // 18%
//!
//! let tax = gst.of(dp.to_decimal());
//! assert_eq!(tax, Decimal::new(22221, 2)); // 222.21
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds an amount to two decimal places, half away from zero.
///
/// This is the only rounding the pricing path performs, applied when a
/// value leaves the cascade for display or for the order payload.
///
/// ```rust
/// use dispatch_core::money::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(10_125, 3)), Decimal::new(1013, 2)); // 10.125 → 10.13
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an amount to whole rupees, half away from zero.
pub fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: discounts are carried as positive amounts, but a
///   signed type keeps subtraction total
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ```rust
    /// use dispatch_core::money::Money;
    ///
    /// let dp = Money::from_paise(99_900); // ₹999.00
    /// assert_eq!(dp.paise(), 99_900);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Converts an exact amount into paise, rounding to two decimals.
    ///
    /// ```rust
    /// use dispatch_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let m = Money::from_decimal(Decimal::new(30_785, 3)); // 30.785
    /// assert_eq!(m.paise(), 3079);
    /// ```
    ///
    /// Amounts beyond the `i64` range saturate.
    pub fn from_decimal(amount: Decimal) -> Self {
        let mut rounded = round_money(amount);
        rounded.rescale(2);
        let paise = i64::try_from(rounded.mantissa()).unwrap_or(if rounded.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        });
        Money(paise)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the exact decimal value in rupees.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }
}

/// Shows money as `₹1234.50`.
///
/// Thousands grouping is left to whoever renders the final screen.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Rate
// =============================================================================

/// A percentage in basis points (1 bps = 0.01%).
///
/// 1800 bps = 18% GST, 250 bps = 2.5% cash discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Returns the rate as a percentage, e.g. `18` or `2.5`.
    pub fn percentage(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2).normalize()
    }

    /// Applies the rate to an amount without rounding.
    ///
    /// ```rust
    /// use dispatch_core::money::Rate;
    /// use rust_decimal::Decimal;
    ///
    /// let cd = Rate::from_bps(500);
    /// assert_eq!(cd.of(Decimal::from(180)), Decimal::from(9));
    /// ```
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount * Decimal::new(i64::from(self.0), 4)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
