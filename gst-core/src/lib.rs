pub mod calculations;
pub mod models;
pub mod validation;
pub mod words;

pub use calculations::{
    CalculatedInvoice, GstConfig, GstConfigError, InvoiceCalculator, InvoiceLine, InvoiceTotals,
    LineTax, calculate_invoice,
};
pub use models::*;
pub use validation::{ValidationError, validate_invoice};
pub use words::{AmountInWordsError, amount_in_words};
