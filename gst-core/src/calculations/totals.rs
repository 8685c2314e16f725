//! Invoice totals: subtotal, split GST, round off and grand total.
//!
//! # Calculation
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Subtotal: sum of every line's quantity × rate |
//! | 2    | Central tax (CGST): subtotal × half the combined rate |
//! | 3    | State tax (SGST): subtotal × half the combined rate |
//! | 4    | Total before round off: subtotal + CGST + SGST |
//! | 5    | Grand total: step 4 rounded to the nearest rupee, ties away from zero |
//! | 6    | Round off: grand total − step 4 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use gst_core::{GstConfig, InvoiceCalculator, LineItem};
//!
//! let items = [
//!     LineItem::new(dec!(2), dec!(100)),
//!     LineItem::new(dec!(1), dec!(50)),
//! ];
//!
//! let totals = InvoiceCalculator::new(GstConfig::default()).calculate(&items);
//!
//! assert_eq!(totals.subtotal, dec!(250));
//! assert_eq!(totals.central_tax, dec!(6.25));
//! assert_eq!(totals.state_tax, dec!(6.25));
//! assert_eq!(totals.grand_total, dec!(263));
//! assert_eq!(totals.rounding_adjustment, dec!(0.5));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::Priced;
use crate::calculations::common::{round_half_up, round_to_rupee};

/// Errors in a [`GstConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GstConfigError {
    /// The combined rate must be between 0 and 1.
    #[error("combined GST rate must be between 0 and 1, got {0}")]
    InvalidCombinedRate(Decimal),
}

/// GST rate applied to an intra-state invoice.
///
/// The combined rate is always split evenly between central and state tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstConfig {
    /// Combined GST rate as a fraction. 5% is `0.05`.
    pub combined_rate: Decimal,
}

impl Default for GstConfig {
    /// 2.5% CGST + 2.5% SGST.
    fn default() -> Self {
        Self {
            combined_rate: Decimal::new(5, 2),
        }
    }
}

impl GstConfig {
    /// Validates that the combined rate is a fraction in [0, 1].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use gst_core::{GstConfig, GstConfigError};
    ///
    /// let config = GstConfig { combined_rate: dec!(5) };
    ///
    /// assert_eq!(config.validate(), Err(GstConfigError::InvalidCombinedRate(dec!(5))));
    /// ```
    pub fn validate(&self) -> Result<(), GstConfigError> {
        if self.combined_rate < Decimal::ZERO || self.combined_rate > Decimal::ONE {
            return Err(GstConfigError::InvalidCombinedRate(self.combined_rate));
        }
        Ok(())
    }

    /// Central tax rate as a fraction.
    pub fn central_rate(&self) -> Decimal {
        self.combined_rate / Decimal::TWO
    }

    /// State tax rate as a fraction.
    pub fn state_rate(&self) -> Decimal {
        self.combined_rate / Decimal::TWO
    }
}

/// Derived totals for a set of line items. Never edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all line amounts.
    pub subtotal: Decimal,

    /// CGST on the subtotal.
    pub central_tax: Decimal,

    /// SGST on the subtotal. Always equal to `central_tax`.
    pub state_tax: Decimal,

    /// Grand total minus the unrounded total. Magnitude is at most 0.5.
    pub rounding_adjustment: Decimal,

    /// Total after tax, rounded to whole rupees.
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// Subtotal plus both taxes, before round off.
    pub fn total_before_round_off(&self) -> Decimal {
        self.subtotal + self.central_tax + self.state_tax
    }
}

/// Tax on a single line, as printed in the tax details table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTax {
    pub taxable_value: Decimal,
    pub central_tax: Decimal,
    pub state_tax: Decimal,
}

/// Calculator for invoice totals.
///
/// Holds no state besides the rate configuration, so it is cheap enough to
/// run on every edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceCalculator {
    config: GstConfig,
}

impl InvoiceCalculator {
    pub fn new(config: GstConfig) -> Self {
        Self { config }
    }

    /// Calculates the invoice totals for `items`.
    ///
    /// An empty slice yields all-zero totals.
    pub fn calculate<T: Priced>(
        &self,
        items: &[T],
    ) -> InvoiceTotals {
        let subtotal = self.subtotal(items);
        let central_tax = self.central_tax(subtotal);
        let state_tax = self.state_tax(subtotal);

        let total_before_round_off = subtotal + central_tax + state_tax;
        let grand_total = round_to_rupee(total_before_round_off);
        let rounding_adjustment = grand_total - total_before_round_off;

        debug!(
            items = items.len(),
            %subtotal,
            %central_tax,
            %state_tax,
            %rounding_adjustment,
            %grand_total,
            "calculated invoice totals"
        );

        InvoiceTotals {
            subtotal,
            central_tax,
            state_tax,
            rounding_adjustment,
            grand_total,
        }
    }

    /// Tax on one line, rounded to paise for display.
    pub fn line_tax<T: Priced>(
        &self,
        item: &T,
    ) -> LineTax {
        let taxable_value = item.amount();
        LineTax {
            taxable_value,
            central_tax: round_half_up(self.central_tax(taxable_value)),
            state_tax: round_half_up(self.state_tax(taxable_value)),
        }
    }

    fn subtotal<T: Priced>(
        &self,
        items: &[T],
    ) -> Decimal {
        items.iter().map(Priced::amount).sum()
    }

    fn central_tax(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        taxable * self.config.central_rate()
    }

    fn state_tax(
        &self,
        taxable: Decimal,
    ) -> Decimal {
        taxable * self.config.state_rate()
    }
}
