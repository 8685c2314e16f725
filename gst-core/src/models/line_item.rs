use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GST rate (percent) printed against a new line item.
pub const DEFAULT_GST_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Unit of measure for a new line item.
pub const DEFAULT_UNIT: &str = "Nos";

/// Anything with a taxable amount.
///
/// The amount is always derived from quantity and rate; implementors never
/// store it.
pub trait Priced {
    fn quantity(&self) -> Decimal;
    fn rate(&self) -> Decimal;

    /// Taxable amount: quantity × rate.
    fn amount(&self) -> Decimal {
        self.quantity() * self.rate()
    }
}

/// A bare quantity/rate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: Decimal,
    pub rate: Decimal,
}

impl LineItem {
    pub fn new(
        quantity: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { quantity, rate }
    }
}

impl Priced for LineItem {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn rate(&self) -> Decimal {
        self.rate
    }
}

/// A line on the tax invoice.
///
/// `hsn_code` is carried as opaque text. `gst_rate` is the percentage
/// printed on the invoice; the tax itself comes from
/// [`GstConfig`](crate::GstConfig).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceItem {
    pub id: u32,
    pub description: String,
    pub hsn_code: String,
    pub gst_rate: Decimal,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub unit: String,
}

impl InvoiceItem {
    /// Creates a blank item: quantity 1, rate 0.
    pub fn blank(id: u32) -> Self {
        Self {
            id,
            description: String::new(),
            hsn_code: String::new(),
            gst_rate: DEFAULT_GST_RATE,
            quantity: Decimal::ONE,
            rate: Decimal::ZERO,
            unit: DEFAULT_UNIT.to_string(),
        }
    }
}

impl Default for InvoiceItem {
    fn default() -> Self {
        Self::blank(1)
    }
}

impl Priced for InvoiceItem {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn rate(&self) -> Decimal {
        self.rate
    }
}
