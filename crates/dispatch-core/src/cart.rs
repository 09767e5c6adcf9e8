//! # Cart Module
//!
//! The dispatch cart: staged product lines, their totals, and their wire
//! form for order submission.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Method                 Cart Change            │
//! │  ───────────────          ──────                 ───────────            │
//! │                                                                         │
//! │  Stage For Dispatch ─────► add(product, qty) ──► push or merge qty      │
//! │                             │                                           │
//! │                             ├── qty <= 0        → rejected, unchanged   │
//! │                             └── qty > stock     → rejected, unchanged   │
//! │                                                                         │
//! │  Remove line ────────────► remove(product_id) ─► lines.retain(..)       │
//! │                                                                         │
//! │  Committed ──────────────► clear() ────────────► lines.clear()          │
//! │                                                                         │
//! │  Review totals ──────────► totals() ───────────► (read only)            │
//! │  Commit ─────────────────► order_items() ──────► (read only)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::round_rupees;
use crate::pricing::{LineBreakdown, PriceTerms};
use crate::types::{OrderItem, Product};
use crate::validation::{validate_cart_size, validate_quantity};
use crate::MAX_CART_ITEMS;

// =============================================================================
// Cart Line
// =============================================================================

/// A staged product and its quantity.
///
/// ## Design Notes
/// - `product_id`: reference back to the catalog
/// - `terms`: frozen copy of the product's pricing at staging time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub sku: String,
    pub name: String,
    pub terms: PriceTerms,
    pub quantity: i64,
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_product(product: &Product, quantity: i64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            sku: product.sku.clone(),
            name: product.name.clone(),
            terms: product.terms(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Runs the pricing cascade for this line.
    pub fn breakdown(&self) -> LineBreakdown {
        self.terms.price(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The dispatch cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (staging again merges quantities)
/// - Every line quantity is > 0
/// - At most [`MAX_CART_ITEMS`] lines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Stages `quantity` units of `product`.
    ///
    /// ## Behavior
    /// - Non-positive quantity: rejected
    /// - Quantity above on-hand stock: rejected
    /// - Product already staged: quantity is added to the existing line
    ///
    /// The stock check compares the requested quantity only, not the
    /// merged total. On any error the cart is left untouched.
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if !product.is_active {
            return Err(CoreError::ProductInactive(product.sku.clone()));
        }

        if !product.can_supply(quantity) {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let merged = line.quantity.saturating_add(quantity);
            validate_quantity(merged)?;
            line.quantity = merged;
            return Ok(());
        }

        validate_cart_size(self.lines.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_ITEMS })?;

        self.lines.push(CartLine::from_product(product, quantity));
        Ok(())
    }

    /// Removes the line for `product_id`.
    pub fn remove(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == initial_len {
            Err(CoreError::NotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Staged lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sums every line's breakdown.
    pub fn totals(&self) -> CartTotals {
        self.lines
            .iter()
            .map(CartLine::breakdown)
            .fold(CartTotals::default(), |mut acc, line| {
                acc.line_count += 1;
                acc.total_quantity += line.quantity;
                acc.base_total += line.base;
                acc.total_discount += line.discount();
                acc.total_gst += line.gst;
                acc.net_total += line.total;
                acc.total_volume_ml = acc.total_volume_ml.saturating_add(line.volume_ml);
                acc
            })
    }

    /// Builds the invoice lines for order submission.
    ///
    /// `sno` follows cart order starting at 1; `rate` and `amount` are
    /// the taxable per-unit and line values rounded to two decimals.
    pub fn order_items(&self, hsn_sac: &str) -> Vec<OrderItem> {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let totals = line.breakdown();
                OrderItem {
                    sno: idx as u32 + 1,
                    description: line.name.clone(),
                    hsn_sac: hsn_sac.to_string(),
                    quantity: line.quantity,
                    rate: totals.submitted_rate(),
                    amount: totals.submitted_amount(),
                }
            })
            .collect()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Aggregate of every line in the cart. Amounts are unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub base_total: Decimal,
    /// Bill and cash discounts combined.
    pub total_discount: Decimal,
    pub total_gst: Decimal,
    pub net_total: Decimal,
    pub total_volume_ml: i64,
}

impl CartTotals {
    /// Net total rounded to whole rupees (the "total payable" line).
    pub fn payable(&self) -> Decimal {
        round_rupees(self.net_total)
    }

    /// Total taxable value (net minus GST).
    pub fn taxable_total(&self) -> Decimal {
        self.net_total - self.total_gst
    }

    /// Total volume in litres.
    pub fn total_litres(&self) -> Decimal {
        Decimal::new(self.total_volume_ml, 3)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, dp_paise: i64, stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: id.to_string(),
            sku: format!("SKU-{}", id),
            name: format!("Paint {}", id),
            dp_paise,
            ml_per_unit: 4000,
            bill_discount_bps: 1000,
            cash_discount_bps: 500,
            gst_bps: 1800,
            stock,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add(&product("1", 10_000, 10), 2).unwrap();

        let totals = cart.totals();
        assert_eq!(cart.len(), 1);
        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.base_total, Decimal::from(200));
        assert_eq!(totals.total_discount, Decimal::from(29));
        assert_eq!(totals.total_gst, Decimal::new(3078, 2));
        assert_eq!(totals.net_total, Decimal::new(20178, 2));
        assert_eq!(totals.total_volume_ml, 8000);
    }

    #[test]
    fn test_adding_same_product_merges_quantity() {
        let mut cart = Cart::new();
        let p = product("1", 10_000, 5);

        cart.add(&p, 2).unwrap();
        cart.add(&p, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_stock_check_uses_requested_quantity() {
        let mut cart = Cart::new();
        let p = product("1", 10_000, 3);

        cart.add(&p, 3).unwrap();
        cart.add(&p, 2).unwrap();
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn test_insufficient_stock_leaves_cart_unchanged() {
        let mut cart = Cart::new();
        let p1 = product("1", 10_000, 10);
        let p2 = product("2", 5_000, 3);
        cart.add(&p1, 2).unwrap();

        let before = cart.totals();
        let err = cart.add(&p2, 4).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 4,
                ..
            }
        ));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.totals(), before);

        // Also for a product already staged
        assert!(cart.add(&p1, 11).is_err());
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let mut cart = Cart::new();
        let p = product("1", 10_000, 10);

        assert!(matches!(cart.add(&p, 0), Err(CoreError::Validation(_))));
        assert!(matches!(cart.add(&p, -2), Err(CoreError::Validation(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_inactive_product_rejected() {
        let mut cart = Cart::new();
        let mut p = product("1", 10_000, 10);
        p.is_active = false;

        assert!(matches!(cart.add(&p, 1), Err(CoreError::ProductInactive(_))));
    }

    #[test]
    fn test_cart_size_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add(&product(&i.to_string(), 100, 10), 1).unwrap();
        }

        let err = cart.add(&product("overflow", 100, 10), 1).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));

        // Merging into an existing line is still allowed
        cart.add(&product("0", 100, 10), 1).unwrap();
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(&product("1", 10_000, 10), 1).unwrap();
        cart.add(&product("2", 10_000, 10), 1).unwrap();

        cart.remove("1").unwrap();
        assert_eq!(cart.len(), 1);
        assert!(matches!(cart.remove("1"), Err(CoreError::NotInCart(_))));

        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_merged_quantity_is_bounded() {
        let p = product("1", 10_000, crate::MAX_LINE_QUANTITY);
        let mut cart = Cart::new();
        cart.add(&p, crate::MAX_LINE_QUANTITY).unwrap();

        let err = cart.add(&p, 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(crate::error::ValidationError::OutOfRange { .. })
        ));
        assert_eq!(cart.lines()[0].quantity, crate::MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_totals_are_order_insensitive() {
        let p1 = product("1", 12_345, 10);
        let p2 = product("2", 99_900, 10);

        let mut a = Cart::new();
        a.add(&p1, 3).unwrap();
        a.add(&p2, 1).unwrap();

        let mut b = Cart::new();
        b.add(&p2, 1).unwrap();
        b.add(&p1, 3).unwrap();

        assert_eq!(a.totals(), b.totals());
    }

    #[test]
    fn test_payable_rounds_to_rupees() {
        let mut cart = Cart::new();
        cart.add(&product("1", 10_000, 10), 2).unwrap();
        let totals = cart.totals();

        assert_eq!(totals.payable(), Decimal::from(202));
        assert_eq!(totals.taxable_total(), Decimal::from(171));
        assert_eq!(totals.total_litres(), Decimal::from(8));
    }

    #[test]
    fn test_order_items() {
        let mut cart = Cart::new();
        cart.add(&product("1", 10_000, 10), 2).unwrap();
        cart.add(&product("2", 33_333, 10), 3).unwrap();

        let items = cart.order_items("998313");
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].sno, 1);
        assert_eq!(items[0].description, "Paint 1");
        assert_eq!(items[0].hsn_sac, "998313");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].rate, Decimal::new(855, 1));
        assert_eq!(items[0].amount, Decimal::from(171));

        // 333.33 × 3 = 999.99 → 899.991 → 854.99145 taxable
        assert_eq!(items[1].sno, 2);
        assert_eq!(items[1].amount, Decimal::new(85499, 2));
        assert_eq!(items[1].rate, Decimal::new(28500, 2));
    }
}
