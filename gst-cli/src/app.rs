//! Loads, validates and calculates an invoice for the CLI.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gst_core::{
    CalculatedInvoice, GstConfig, InvoiceData, ValidationError, calculate_invoice,
    validate_invoice,
};
use gst_data::{InvoiceDocument, LineItemLoader, load_gst_config};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

/// Every problem that stops an invoice from being issued.
#[derive(Debug, Error)]
#[error("invoice is not ready to issue:{}", list(.0))]
pub struct InvalidInvoice(pub Vec<ValidationError>);

fn list(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| format!("\n  - {e}")).collect()
}

/// Input files and overrides for one invoice.
#[derive(Debug, Clone, Default)]
pub struct InvoiceSources {
    /// TOML invoice document.
    pub invoice: PathBuf,
    /// CSV whose rows replace the document's items.
    pub items: Option<PathBuf>,
    /// TOML GST configuration.
    pub config: Option<PathBuf>,
    /// Combined GST rate (fraction); wins over `config`.
    pub gst_rate: Option<Decimal>,
}

/// Reads the invoice document and, if given, the line item CSV.
pub fn load_invoice_data(sources: &InvoiceSources) -> Result<InvoiceData> {
    let mut data = InvoiceDocument::from_path(&sources.invoice)
        .with_context(|| format!("Failed to load invoice: {}", sources.invoice.display()))?;

    if let Some(items_path) = &sources.items {
        let items = LineItemLoader::from_path(items_path)
            .with_context(|| format!("Failed to load items: {}", items_path.display()))?;
        debug!(count = items.len(), "replacing document items from CSV");
        data.replace_items(items);
    }

    Ok(data)
}

/// Picks the GST rate: explicit override, then config file, then 5%.
pub fn resolve_gst_config(sources: &InvoiceSources) -> Result<GstConfig> {
    if let Some(combined_rate) = sources.gst_rate {
        let config = GstConfig { combined_rate };
        config.validate()?;
        return Ok(config);
    }
    load_gst_config(sources.config.as_deref()).context("Failed to load GST configuration")
}

/// Loads, validates and calculates the invoice.
pub fn build_invoice(sources: &InvoiceSources) -> Result<CalculatedInvoice> {
    let data = load_invoice_data(sources)?;
    validate_invoice(&data).map_err(InvalidInvoice)?;

    let gst = resolve_gst_config(sources)?;
    let invoice = calculate_invoice(&data, gst).context("Failed to calculate invoice")?;

    info!(
        invoice_no = %invoice.header.invoice_no,
        lines = invoice.lines.len(),
        grand_total = %invoice.totals.grand_total,
        "invoice ready"
    );
    Ok(invoice)
}

/// Writes the rendered document to `output`, or stdout when `None`.
pub fn write_output(
    document: &str,
    output: Option<&Path>,
) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, document)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            info!(path = %path.display(), "invoice written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
