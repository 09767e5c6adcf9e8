//! # Cart State
//!
//! Shared handle to the dispatch cart.
//!
//! The cart lives behind `Arc<Mutex<_>>` and is only touched through the
//! closure helpers below, so no lock is ever held across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use dispatch_core::{Cart, CartTotals};

/// Thread-safe wrapper around the [`Cart`].
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add(&product, 2))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    /// Current totals.
    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| cart.totals())
    }

    // Cart methods leave the cart unchanged on error, so a poisoned lock
    // still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dispatch_core::Product;

    fn product(sku: &str, stock: i64) -> Product {
        Product {
            id: format!("id-{sku}"),
            sku: sku.to_string(),
            name: format!("Paint {sku}"),
            dp_paise: 10_000,
            ml_per_unit: 1_000,
            bill_discount_bps: 1000,
            cash_discount_bps: 500,
            gst_bps: 1800,
            stock,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_clones_share_one_cart() {
        let state = CartState::new();
        let other = state.clone();

        other
            .with_cart_mut(|cart| cart.add(&product("A", 5), 2))
            .unwrap();

        assert_eq!(state.with_cart(|cart| cart.len()), 1);
        assert_eq!(state.totals().total_quantity, 2);
    }

    #[test]
    fn test_rejected_add_leaves_cart_unchanged() {
        let state = CartState::new();
        state.with_cart_mut(|cart| cart.add(&product("A", 5), 2)).unwrap();

        let result = state.with_cart_mut(|cart| cart.add(&product("A", 5), 6));
        assert!(result.is_err());
        assert_eq!(state.totals().total_quantity, 2);
    }

    #[test]
    fn test_survives_poisoned_lock() {
        let state = CartState::new();
        let poisoner = state.clone();

        let _ = std::thread::spawn(move || {
            poisoner.with_cart_mut(|_| panic!("boom"));
        })
        .join();

        state.with_cart_mut(|cart| cart.add(&product("B", 1), 1)).unwrap();
        assert_eq!(state.with_cart(|cart| cart.len()), 1);
    }
}
