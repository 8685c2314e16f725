//! Rupee amounts in English words, as printed under "Amount in Words".
//!
//! The integer part is grouped in thousands using the short scale
//! (thousand, million, billion, trillion). Paise are appended when present.
//!
//! ```
//! use rust_decimal_macros::dec;
//! use gst_core::amount_in_words;
//!
//! assert_eq!(amount_in_words(dec!(263)).unwrap(), "Two hundred sixty three rupees only");
//! assert_eq!(
//!     amount_in_words(dec!(100.50)).unwrap(),
//!     "One hundred rupees and fifty paise only"
//! );
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::trace;

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 5] = ["", "thousand", "million", "billion", "trillion"];

/// Smallest rupee amount without a scale word: one thousand trillion.
pub(crate) const RUPEE_LIMIT: u64 = 1_000_000_000_000_000;

/// Amounts outside the domain the converter can express.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountInWordsError {
    #[error("amount must not be negative, got {0}")]
    Negative(Decimal),

    #[error("amount {0} exceeds the largest supported scale (trillion)")]
    OutOfRange(Decimal),
}

/// Pushes the words for `n` (0..=999). Zero pushes nothing.
fn push_hundreds(
    mut n: u64,
    words: &mut Vec<&'static str>,
) {
    if n > 99 {
        words.push(ONES[(n / 100) as usize]);
        words.push("hundred");
        n %= 100;
    }
    if n > 19 {
        words.push(TENS[(n / 10) as usize]);
        n %= 10;
    }
    if n > 0 {
        words.push(ONES[n as usize]);
    }
}

/// Pushes the words for a whole rupee amount below [`RUPEE_LIMIT`].
fn push_rupees(
    rupees: u64,
    words: &mut Vec<&'static str>,
) {
    if rupees == 0 {
        words.push("zero");
        return;
    }

    let mut chunks = Vec::with_capacity(SCALES.len());
    let mut remaining = rupees;
    while remaining > 0 {
        chunks.push(remaining % 1000);
        remaining /= 1000;
    }

    for (scale, &chunk) in chunks.iter().enumerate().rev() {
        if chunk == 0 {
            continue;
        }
        push_hundreds(chunk, words);
        if !SCALES[scale].is_empty() {
            words.push(SCALES[scale]);
        }
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits `amount` into whole rupees and paise (0..=99).
///
/// Paise are rounded half away from zero; 100 paise carry into the rupees.
fn split_rupees_paise(amount: Decimal) -> (Decimal, Decimal) {
    let rupees = amount.trunc();
    let paise = ((amount - rupees) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if paise >= Decimal::ONE_HUNDRED {
        (rupees + Decimal::ONE, paise - Decimal::ONE_HUNDRED)
    } else {
        (rupees, paise)
    }
}

/// Renders a non-negative rupee amount as
/// `"<rupees> rupees[ and <paise> paise] only"` with the first letter
/// capitalized.
///
/// # Errors
///
/// Returns [`AmountInWordsError`] if `amount` is negative or its whole
/// rupee part reaches one thousand trillion.
pub fn amount_in_words(amount: Decimal) -> Result<String, AmountInWordsError> {
    if amount < Decimal::ZERO {
        return Err(AmountInWordsError::Negative(amount));
    }
    if amount.is_zero() {
        return Ok("Zero rupees only".to_string());
    }

    let (rupees, paise) = split_rupees_paise(amount);
    let rupees = rupees
        .to_u64()
        .filter(|&r| r < RUPEE_LIMIT)
        .ok_or(AmountInWordsError::OutOfRange(amount))?;
    // Always 0..=99 after the split.
    let paise = paise.to_u64().unwrap_or_default();

    let mut words = Vec::new();
    push_rupees(rupees, &mut words);
    words.push("rupees");
    if paise > 0 {
        words.push("and");
        push_hundreds(paise, &mut words);
        words.push("paise");
    }
    words.push("only");

    let text = capitalize_first(&words.join(" "));
    trace!(%amount, %text, "amount in words");
    Ok(text)
}
