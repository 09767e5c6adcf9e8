//! # Amount in Words
//!
//! Rupee amounts spelled out in Indian numbering (Thousand, Lakh, Crore),
//! as printed under the invoice total.
//!
//! ```rust
//! use dispatch_core::words::amount_in_words;
//! use rust_decimal::Decimal;
//!
//! assert_eq!(
//!     amount_in_words(Decimal::new(123_456_789, 2)),
//!     "Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Rupees and Eighty Nine Paise Only"
//! );
//! ```

use rust_decimal::Decimal;

use crate::money::round_money;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u128 = 1_00_00_000;
const LAKH: u128 = 1_00_000;
const THOUSAND: u128 = 1_000;

/// Spells out `amount` (rounded to paise) in words.
///
/// ## Shapes
/// - `0` → `"Zero Only"`
/// - `0.50` → `"Fifty Paise Only"`
/// - `201.78` → `"Two Hundred One Rupees and Seventy Eight Paise Only"`
/// - negative amounts get a `"Minus "` prefix
pub fn amount_in_words(amount: Decimal) -> String {
    let amount = round_money(amount);

    if amount.is_zero() {
        return "Zero Only".to_string();
    }
    if amount.is_sign_negative() {
        return format!("Minus {}", amount_in_words(-amount));
    }

    let whole = integer_part(amount.trunc());
    let paise = integer_part((amount.fract() * Decimal::ONE_HUNDRED).trunc());

    if whole == 0 {
        return format!("{} Paise Only", below_thousand(paise));
    }

    let mut words = format!("{} Rupees", indian_number(whole));
    if paise > 0 {
        words.push_str(" and ");
        words.push_str(&below_thousand(paise));
        words.push_str(" Paise");
    }
    words.push_str(" Only");
    words
}

fn integer_part(value: Decimal) -> u128 {
    let mut value = value;
    value.rescale(0);
    value.mantissa().unsigned_abs()
}

/// Words for a whole number using Crore / Lakh / Thousand groups.
///
/// Crore counts above 99 are spelled recursively ("One Hundred Crore").
fn indian_number(mut n: u128) -> String {
    let mut parts = Vec::new();

    if n >= CRORE {
        parts.push(format!("{} Crore", indian_number(n / CRORE)));
        n %= CRORE;
    }
    if n >= LAKH {
        parts.push(format!("{} Lakh", below_thousand(n / LAKH)));
        n %= LAKH;
    }
    if n >= THOUSAND {
        parts.push(format!("{} Thousand", below_thousand(n / THOUSAND)));
        n %= THOUSAND;
    }
    if n > 0 {
        parts.push(below_thousand(n));
    }

    parts.join(" ")
}

fn below_thousand(n: u128) -> String {
    let n = n as usize;
    match n {
        0 => String::new(),
        1..=19 => ONES[n].to_string(),
        20..=99 => format!("{} {}", TENS[n / 10], ONES[n % 10]).trim().to_string(),
        _ => format!("{} Hundred {}", ONES[n / 100], below_thousand((n % 100) as u128))
            .trim()
            .to_string(),
    }
}
