//! Assembles a complete computed invoice from the form record.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::calculations::totals::{GstConfig, InvoiceCalculator, InvoiceTotals, LineTax};
use crate::models::{BankDetails, BuyerDetails, CompanyDetails, InvoiceData, InvoiceHeader};
use crate::words::{AmountInWordsError, amount_in_words};
use crate::{InvoiceItem, Priced};

/// One row of the items table, with its derived amount and tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceLine {
    /// Position on the invoice, starting at 1.
    pub sr_no: usize,
    #[serde(flatten)]
    pub item: InvoiceItem,
    pub amount: Decimal,
    pub tax: LineTax,
}

/// The record handed to a renderer: form data plus every derived field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatedInvoice {
    pub header: InvoiceHeader,
    pub company: CompanyDetails,
    pub buyer: BuyerDetails,
    pub lines: Vec<InvoiceLine>,
    pub bank: BankDetails,
    pub terms_and_conditions: String,
    pub gst: GstConfig,
    pub totals: InvoiceTotals,
    pub amount_in_words: String,
}

/// Calculates totals and the amount in words for `data`.
///
/// The result is rebuilt from scratch on every call, so it always reflects
/// the current items.
///
/// # Errors
///
/// Returns [`AmountInWordsError`] when the grand total is negative (a
/// credit note) or too large to express in words.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use gst_core::{GstConfig, InvoiceData, calculate_invoice};
///
/// let mut data = InvoiceData::default();
/// data.set_quantity(1, dec!(2));
/// data.set_rate(1, dec!(100));
/// let second = data.add_item();
/// data.set_rate(second, dec!(50));
///
/// let invoice = calculate_invoice(&data, GstConfig::default()).unwrap();
///
/// assert_eq!(invoice.totals.grand_total, dec!(263));
/// assert_eq!(invoice.amount_in_words, "Two hundred sixty three rupees only");
/// ```
pub fn calculate_invoice(
    data: &InvoiceData,
    gst: GstConfig,
) -> Result<CalculatedInvoice, AmountInWordsError> {
    let calculator = InvoiceCalculator::new(gst);
    let totals = calculator.calculate(&data.items);
    let amount_in_words = amount_in_words(totals.grand_total)?;

    let lines = data
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| InvoiceLine {
            sr_no: index + 1,
            item: item.clone(),
            amount: item.amount(),
            tax: calculator.line_tax(item),
        })
        .collect();

    info!(
        invoice_no = %data.header.invoice_no,
        grand_total = %totals.grand_total,
        "invoice calculated"
    );

    Ok(CalculatedInvoice {
        header: data.header.clone(),
        company: data.company.clone(),
        buyer: data.buyer.clone(),
        lines,
        bank: data.bank.clone(),
        terms_and_conditions: data.terms_and_conditions.clone(),
        gst,
        totals,
        amount_in_words,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn scenario() -> InvoiceData {
        let mut data = InvoiceData::default();
        data.header.invoice_no = "INV-001".to_string();
        data.set_quantity(1, dec!(2));
        data.set_rate(1, dec!(100));
        let second = data.add_item();
        data.set_rate(second, dec!(50));
        data
    }

    #[test]
    fn calculate_invoice_derives_totals_and_words() {
        let invoice = calculate_invoice(&scenario(), GstConfig::default()).unwrap();

        assert_eq!(invoice.totals.subtotal, dec!(250));
        assert_eq!(invoice.totals.grand_total, dec!(263));
        assert_eq!(invoice.amount_in_words, "Two hundred sixty three rupees only");
    }

    #[test]
    fn calculate_invoice_numbers_lines_by_position() {
        let mut data = scenario();
        let third = data.add_item();
        data.set_rate(third, dec!(10));
        assert!(data.remove_item(2));

        let invoice = calculate_invoice(&data, GstConfig::default()).unwrap();

        let numbering: Vec<(usize, u32)> = invoice
            .lines
            .iter()
            .map(|line| (line.sr_no, line.item.id))
            .collect();
        assert_eq!(numbering, vec![(1, 1), (2, 3)]);
    }

    #[test]
    fn calculate_invoice_carries_line_amounts_and_taxes() {
        let invoice = calculate_invoice(&scenario(), GstConfig::default()).unwrap();

        let first = &invoice.lines[0];
        assert_eq!(first.amount, dec!(200));
        assert_eq!(first.tax.central_tax, dec!(5.00));
        assert_eq!(first.tax.state_tax, dec!(5.00));
    }

    #[test]
    fn recalculating_after_edit_refreshes_words() {
        let mut data = scenario();
        let before = calculate_invoice(&data, GstConfig::default()).unwrap();

        data.set_quantity(1, dec!(10));
        let after = calculate_invoice(&data, GstConfig::default()).unwrap();

        assert_eq!(before.amount_in_words, "Two hundred sixty three rupees only");
        // 10 × 100 + 50 = 1050, × 1.05 = 1102.5
        assert_eq!(after.totals.grand_total, dec!(1103));
        assert_eq!(
            after.amount_in_words,
            "One thousand one hundred three rupees only"
        );
    }

    #[test]
    fn calculate_invoice_is_idempotent() {
        let data = scenario();

        let first = calculate_invoice(&data, GstConfig::default()).unwrap();
        let second = calculate_invoice(&data, GstConfig::default()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn credit_note_total_cannot_be_worded() {
        let mut data = scenario();
        data.set_quantity(1, dec!(-5));

        let result = calculate_invoice(&data, GstConfig::default());

        // -500 + 50 = -450, × 1.05 = -472.5
        assert_eq!(result, Err(AmountInWordsError::Negative(dec!(-473))));
    }

    #[test]
    fn calculated_invoice_serializes_line_amount() {
        let invoice = calculate_invoice(&scenario(), GstConfig::default()).unwrap();

        let json = serde_json::to_value(&invoice).unwrap();

        assert_eq!(json["lines"][0]["sr_no"], 1);
        assert_eq!(json["lines"][0]["amount"], "200");
        assert_eq!(json["lines"][1]["unit"], "Nos");
        assert_eq!(json["amount_in_words"], "Two hundred sixty three rupees only");
    }
}
