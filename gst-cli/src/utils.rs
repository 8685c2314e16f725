use rust_decimal::Decimal;
use thiserror::Error;

use gst_core::calculations::common::round_half_up;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a GST percentage such as `"18"` or `"12.5%"` into a fraction.
pub fn parse_percent(s: &str) -> Result<Decimal, ParseDecimalError> {
    let percent = parse_decimal(s.trim().trim_end_matches('%'))?;
    Ok(percent / Decimal::ONE_HUNDRED)
}

/// Formats a rupee amount with two decimals and no digit grouping, e.g. `₹1050.00`.
pub fn format_rupees(value: Decimal) -> String {
    let rounded = round_half_up(value);
    if rounded < Decimal::ZERO {
        format!("-₹{:.2}", rounded.abs())
    } else {
        format!("₹{:.2}", rounded)
    }
}

/// Formats a fraction as a percentage without trailing zeros (`0.025` → `2.5%`).
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
