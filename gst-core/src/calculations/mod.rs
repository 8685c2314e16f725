//! GST invoice calculations.
//!
//! [`totals`] turns line items into an [`InvoiceTotals`] record and
//! [`invoice`] assembles the complete computed invoice, including the
//! amount in words.

pub mod common;
pub mod invoice;
pub mod totals;

pub use invoice::{CalculatedInvoice, InvoiceLine, calculate_invoice};
pub use totals::{GstConfig, GstConfigError, InvoiceCalculator, InvoiceTotals, LineTax};
