//! # Checkout State
//!
//! The "submission in progress" flag. A second submission attempted while
//! one is outstanding is refused rather than queued.
//!
//! ```text
//! try_begin() ──► Some(guard)  flag false → true
//!      │
//!      └─────────► None        flag already true
//!
//! drop(guard) ──► flag true → false   (also on error or panic)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tracks whether an order submission is outstanding.
#[derive(Debug, Clone, Default)]
pub struct CheckoutState {
    in_progress: Arc<AtomicBool>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the submission slot, or `None` if it is taken.
    pub fn try_begin(&self) -> Option<CheckoutGuard> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| CheckoutGuard {
                flag: Arc::clone(&self.in_progress),
            })
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }
}

/// Releases the submission slot when dropped.
#[derive(Debug)]
pub struct CheckoutGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for CheckoutGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
