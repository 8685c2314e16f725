use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BankDetails, BuyerDetails, CompanyDetails, InvoiceItem};

/// Terms printed when the user leaves them untouched.
pub const DEFAULT_TERMS: &str =
    "1. Payment should be made within 30 days.\n2. All disputes subject to local jurisdiction.";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Reference fields from the invoice's top-right block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceHeader {
    pub invoice_no: String,
    pub date: NaiveDate,
    pub delivery_note: String,
    pub payment_terms: String,
    pub supplier_ref: String,
    pub buyer_order_no: String,
    pub dispatch_details: String,
    pub destination: String,
    pub delivery_note_date: String,
}

impl Default for InvoiceHeader {
    fn default() -> Self {
        Self {
            invoice_no: String::new(),
            date: today(),
            delivery_note: String::new(),
            payment_terms: String::new(),
            supplier_ref: String::new(),
            buyer_order_no: String::new(),
            dispatch_details: String::new(),
            destination: String::new(),
            delivery_note_date: String::new(),
        }
    }
}

/// Everything the invoice form collects, before any totals are derived.
///
/// Totals and the amount in words are not stored here; they are produced
/// fresh by [`calculate_invoice`](crate::calculate_invoice) on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceData {
    pub header: InvoiceHeader,
    pub company: CompanyDetails,
    pub buyer: BuyerDetails,
    pub items: Vec<InvoiceItem>,
    pub bank: BankDetails,
    pub terms_and_conditions: String,
}

impl Default for InvoiceData {
    fn default() -> Self {
        Self {
            header: InvoiceHeader::default(),
            company: CompanyDetails::default(),
            buyer: BuyerDetails::default(),
            items: vec![InvoiceItem::blank(1)],
            bank: BankDetails::default(),
            terms_and_conditions: DEFAULT_TERMS.to_string(),
        }
    }
}

impl InvoiceData {
    fn next_item_id(&self) -> u32 {
        self.items.iter().map(|item| item.id).max().unwrap_or(0) + 1
    }

    fn item_mut(
        &mut self,
        id: u32,
    ) -> Option<&mut InvoiceItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Appends a blank item and returns its id.
    pub fn add_item(&mut self) -> u32 {
        let id = self.next_item_id();
        self.items.push(InvoiceItem::blank(id));
        id
    }

    /// Removes the item with `id`.
    ///
    /// The last remaining item is never removed. Returns `false` when the
    /// removal was refused or no such item exists.
    pub fn remove_item(
        &mut self,
        id: u32,
    ) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Sets the quantity of item `id`. Returns `false` if there is no such item.
    pub fn set_quantity(
        &mut self,
        id: u32,
        quantity: Decimal,
    ) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Sets the unit rate of item `id`. Returns `false` if there is no such item.
    pub fn set_rate(
        &mut self,
        id: u32,
        rate: Decimal,
    ) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.rate = rate;
                true
            }
            None => false,
        }
    }

    /// Replaces all items, renumbering ids from 1 in the given order.
    pub fn replace_items(
        &mut self,
        items: impl IntoIterator<Item = InvoiceItem>,
    ) {
        self.items = items
            .into_iter()
            .zip(1..)
            .map(|(item, id)| InvoiceItem { id, ..item })
            .collect();
    }
}
