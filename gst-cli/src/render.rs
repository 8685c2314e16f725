//! Printable output for a calculated invoice.
//!
//! [`TextRenderer`] lays the invoice out as a fixed-width tax invoice for a
//! terminal or printer; [`JsonRenderer`] emits the full record for other
//! tools. Both consume a [`CalculatedInvoice`] and never recompute it.

use std::fmt::Write;

use anyhow::Result;
use clap::ValueEnum;
use gst_core::CalculatedInvoice;

use crate::utils::{format_percent, format_rupees};

const WIDTH: usize = 80;
const COLUMN: usize = 40;

/// Output formats understood by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn InvoiceRenderer> {
        match self {
            Self::Text => Box::new(TextRenderer),
            Self::Json => Box::new(JsonRenderer),
        }
    }
}

/// Turns a calculated invoice into a document.
pub trait InvoiceRenderer {
    fn render(
        &self,
        invoice: &CalculatedInvoice,
    ) -> Result<String>;
}

/// Pretty-printed JSON of the whole record.
pub struct JsonRenderer;

impl InvoiceRenderer for JsonRenderer {
    fn render(
        &self,
        invoice: &CalculatedInvoice,
    ) -> Result<String> {
        let mut json = serde_json::to_string_pretty(invoice)?;
        json.push('\n');
        Ok(json)
    }
}

/// Fixed-width printable tax invoice.
pub struct TextRenderer;

fn rule(
    out: &mut String,
    ch: char,
) -> std::fmt::Result {
    writeln!(out, "{}", ch.to_string().repeat(WIDTH))
}

fn columns(
    out: &mut String,
    left: &str,
    right: &str,
) -> std::fmt::Result {
    writeln!(out, "{}", format!("{left:<COLUMN$}{right}").trim_end())
}

/// Truncates to `width` characters so table columns stay aligned.
fn fit(
    text: &str,
    width: usize,
) -> String {
    text.chars().take(width).collect()
}

impl TextRenderer {
    fn header(
        &self,
        out: &mut String,
        invoice: &CalculatedInvoice,
    ) -> std::fmt::Result {
        let company = &invoice.company;
        let header = &invoice.header;

        writeln!(out, "{}", format!("{:^WIDTH$}", "TAX INVOICE").trim_end())?;
        rule(out, '=')?;

        let left = [
            company.name.clone(),
            company.address.clone(),
            format!("GSTIN/UIN: {}", company.gstin),
            format!("State: {}", company.state),
            format!("Contact: {}", company.contact),
            format!("Email: {}", company.email),
        ];
        let right = [
            format!("Invoice No.:     {}", header.invoice_no),
            format!("Date:            {}", header.date.format("%d/%m/%Y")),
            format!("Delivery Note:   {}", header.delivery_note),
            format!("Payment Terms:   {}", header.payment_terms),
            format!("Supplier Ref.:   {}", header.supplier_ref),
            format!("Buyer Order No.: {}", header.buyer_order_no),
        ];
        for (l, r) in left.iter().zip(right.iter()) {
            columns(out, &fit(l, COLUMN - 2), r)?;
        }
        if !header.dispatch_details.is_empty() || !header.destination.is_empty() {
            columns(
                out,
                &format!("Dispatched Through: {}", header.dispatch_details),
                &format!("Destination:     {}", header.destination),
            )?;
        }
        rule(out, '-')
    }

    fn parties(
        &self,
        out: &mut String,
        invoice: &CalculatedInvoice,
    ) -> std::fmt::Result {
        let buyer = &invoice.buyer;
        let block = [
            buyer.name.clone(),
            buyer.address.clone(),
            format!("District: {}", buyer.district),
            format!("GSTIN/UIN: {}", buyer.gstin),
            format!("State: {}", buyer.state),
        ];

        columns(out, "Buyer (Bill to)", "Consignee (Ship to)")?;
        for line in &block {
            let line = fit(line, COLUMN - 2);
            columns(out, &line, &line)?;
        }
        rule(out, '-')
    }

    fn items(
        &self,
        out: &mut String,
        invoice: &CalculatedInvoice,
    ) -> std::fmt::Result {
        writeln!(
            out,
            "{:>3}  {:<26} {:<8} {:>10} {:>13} {:>13}",
            "Sr.", "Description of Goods", "HSN/SAC", "Quantity", "Rate", "Amount"
        )?;
        rule(out, '-')?;
        for line in &invoice.lines {
            let quantity = format!("{} {}", line.item.quantity.normalize(), line.item.unit);
            writeln!(
                out,
                "{:>3}  {:<26} {:<8} {:>10} {:>13} {:>13}",
                line.sr_no,
                fit(&line.item.description, 26),
                fit(&line.item.hsn_code, 8),
                fit(&quantity, 10),
                format_rupees(line.item.rate),
                format_rupees(line.amount),
            )?;
        }
        rule(out, '-')
    }

    fn tax_details(
        &self,
        out: &mut String,
        invoice: &CalculatedInvoice,
    ) -> std::fmt::Result {
        writeln!(out, "Tax Details")?;
        writeln!(
            out,
            "{:<10} {:>16} {:>16} {:>16}",
            "HSN/SAC", "Taxable Value", "Central Tax", "State Tax"
        )?;
        for line in &invoice.lines {
            writeln!(
                out,
                "{:<10} {:>16} {:>16} {:>16}",
                fit(&line.item.hsn_code, 10),
                format_rupees(line.tax.taxable_value),
                format_rupees(line.tax.central_tax),
                format_rupees(line.tax.state_tax),
            )?;
        }
        let totals = &invoice.totals;
        writeln!(
            out,
            "{:<10} {:>16} {:>16} {:>16}",
            "Total",
            format_rupees(totals.subtotal),
            format_rupees(totals.central_tax),
            format_rupees(totals.state_tax),
        )?;
        writeln!(out)
    }

    fn totals(
        &self,
        out: &mut String,
        invoice: &CalculatedInvoice,
    ) -> std::fmt::Result {
        let totals = &invoice.totals;
        let rows = [
            ("Total Amount Before Tax:".to_string(), totals.subtotal),
            (
                format!("Add: CGST @ {}:", format_percent(invoice.gst.central_rate())),
                totals.central_tax,
            ),
            (
                format!("Add: SGST @ {}:", format_percent(invoice.gst.state_rate())),
                totals.state_tax,
            ),
            ("Round Off:".to_string(), totals.rounding_adjustment),
        ];
        for (label, value) in &rows {
            writeln!(out, "{:<COLUMN$}{:>COLUMN$}", label, format_rupees(*value))?;
        }
        writeln!(out, "{:>WIDTH$}", "-".repeat(COLUMN))?;
        writeln!(
            out,
            "{:<COLUMN$}{:>COLUMN$}",
            "Total Amount After Tax:",
            format_rupees(totals.grand_total)
        )?;
        writeln!(out)?;
        writeln!(out, "Amount in Words:")?;
        writeln!(out, "{}", invoice.amount_in_words)?;
        rule(out, '-')
    }

    fn footer(
        &self,
        out: &mut String,
        invoice: &CalculatedInvoice,
    ) -> std::fmt::Result {
        let bank = &invoice.bank;
        let left = [
            "Bank Details".to_string(),
            format!("Bank Name: {}", bank.bank_name),
            format!("Branch: {}", bank.branch),
            format!("IFSC: {}", bank.ifsc),
            format!("Account No: {}", bank.account_no),
        ];
        let right = [
            "Customer Seal & Signature".to_string(),
            String::new(),
            String::new(),
            format!("For {}", invoice.company.name),
            "Authorized Signatory".to_string(),
        ];
        for (l, r) in left.iter().zip(right.iter()) {
            columns(out, l, r)?;
        }
        writeln!(out)?;
        writeln!(out, "Terms & Conditions")?;
        for line in invoice.terms_and_conditions.lines() {
            writeln!(out, "{line}")?;
        }
        rule(out, '=')
    }
}

impl InvoiceRenderer for TextRenderer {
    fn render(
        &self,
        invoice: &CalculatedInvoice,
    ) -> Result<String> {
        let mut out = String::new();
        self.header(&mut out, invoice)?;
        self.parties(&mut out, invoice)?;
        self.items(&mut out, invoice)?;
        self.tax_details(&mut out, invoice)?;
        self.totals(&mut out, invoice)?;
        self.footer(&mut out, invoice)?;
        Ok(out)
    }
}
