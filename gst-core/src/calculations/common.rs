//! Common rounding helpers for invoice calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero). Used
/// for per-line tax figures and anything shown as rupees and paise.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gst_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to the nearest whole rupee.
///
/// Ties are resolved away from zero, so `262.5` becomes `263` and a credit
/// note total of `-262.5` becomes `-263`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use gst_core::calculations::common::round_to_rupee;
///
/// assert_eq!(round_to_rupee(dec!(262.5)), dec!(263));
/// assert_eq!(round_to_rupee(dec!(262.49)), dec!(262));
/// assert_eq!(round_to_rupee(dec!(-262.5)), dec!(-263));
/// ```
pub fn round_to_rupee(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
