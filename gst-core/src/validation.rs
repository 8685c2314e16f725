//! Form-level checks run before an invoice reaches the calculator.
//!
//! The calculator itself assumes clean input; this is where blank required
//! fields, negative quantities, malformed GSTINs and amounts too large to
//! calculate are caught.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::InvoiceData;
use crate::words::RUPEE_LIMIT;

/// State code, PAN, entity number, `Z`, checksum.
static GSTIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][1-9A-Z]Z[0-9A-Z]$").expect("valid GSTIN regex")
});

/// A problem with the invoice form. `sr_no` is the 1-based line position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invoice number is required")]
    MissingInvoiceNumber,

    #[error("buyer name is required")]
    MissingBuyerName,

    #[error("at least one line item is required")]
    NoItems,

    #[error("line {sr_no}: quantity must not be negative, got {quantity}")]
    NegativeQuantity { sr_no: usize, quantity: Decimal },

    #[error("line {sr_no}: rate must not be negative, got {rate}")]
    NegativeRate { sr_no: usize, rate: Decimal },

    /// Quantity × rate does not fit in a `Decimal`.
    #[error("line {sr_no}: amount is too large to calculate")]
    AmountTooLarge { sr_no: usize },

    /// The subtotal overflows or reaches the amount-in-words limit.
    #[error("subtotal must be below {} rupees", RUPEE_LIMIT)]
    SubtotalTooLarge,

    #[error("{party} GSTIN '{gstin}' is not a valid 15-character GSTIN")]
    InvalidGstin { party: &'static str, gstin: String },
}

/// Returns `true` if `gstin` has the shape of a GST identification number.
///
/// ```
/// use gst_core::validation::is_valid_gstin;
///
/// assert!(is_valid_gstin("27DXBPB6351N1ZA"));
/// assert!(!is_valid_gstin("27DXBPB6351N1Z"));
/// ```
pub fn is_valid_gstin(gstin: &str) -> bool {
    GSTIN_PATTERN.is_match(gstin)
}

fn check_gstin(
    party: &'static str,
    gstin: &str,
    errors: &mut Vec<ValidationError>,
) {
    let gstin = gstin.trim();
    if !gstin.is_empty() && !is_valid_gstin(gstin) {
        errors.push(ValidationError::InvalidGstin {
            party,
            gstin: gstin.to_string(),
        });
    }
}

/// Validates the invoice form, collecting every problem found.
///
/// GSTINs are optional; only non-empty values are checked.
///
/// # Errors
///
/// Returns all [`ValidationError`]s in form order.
pub fn validate_invoice(data: &InvoiceData) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if data.header.invoice_no.trim().is_empty() {
        errors.push(ValidationError::MissingInvoiceNumber);
    }
    if data.buyer.name.trim().is_empty() {
        errors.push(ValidationError::MissingBuyerName);
    }
    check_gstin("company", &data.company.gstin, &mut errors);
    check_gstin("buyer", &data.buyer.gstin, &mut errors);

    if data.items.is_empty() {
        errors.push(ValidationError::NoItems);
    }
    // `None` once a line overflows or the running sum does.
    let mut subtotal = Some(Decimal::ZERO);
    let mut line_overflow = false;
    for (index, item) in data.items.iter().enumerate() {
        let sr_no = index + 1;
        if item.quantity < Decimal::ZERO {
            errors.push(ValidationError::NegativeQuantity {
                sr_no,
                quantity: item.quantity,
            });
        }
        if item.rate < Decimal::ZERO {
            errors.push(ValidationError::NegativeRate {
                sr_no,
                rate: item.rate,
            });
        }
        match item.quantity.checked_mul(item.rate) {
            Some(amount) => subtotal = subtotal.and_then(|sum| sum.checked_add(amount)),
            None => {
                line_overflow = true;
                subtotal = None;
                errors.push(ValidationError::AmountTooLarge { sr_no });
            }
        }
    }
    if !line_overflow && subtotal.is_none_or(|sum| sum.abs() >= Decimal::from(RUPEE_LIMIT)) {
        errors.push(ValidationError::SubtotalTooLarge);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        warn!(count = errors.len(), "invoice failed validation");
        Err(errors)
    }
}
