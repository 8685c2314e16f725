use std::path::PathBuf;

use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;

use gst_cli::app::{self, InvoiceSources};
use gst_cli::logging::{self, LogOptions};
use gst_cli::render::{InvoiceRenderer, OutputFormat};
use gst_cli::utils::parse_percent;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// GST tax invoice generator.
///
/// Reads an invoice document, computes CGST/SGST, round off and the amount
/// in words, and prints a tax invoice.
#[derive(Debug, Parser)]
#[command(name = "gst-invoice")]
#[command(version, about, long_about = None)]
struct Cli {
    /// TOML invoice document.
    #[arg(short, long)]
    invoice: PathBuf,

    /// CSV of line items replacing the document's items.
    #[arg(long)]
    items: Option<PathBuf>,

    /// TOML file with the combined GST rate.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Combined GST rate in percent (e.g. `18`); overrides --config.
    #[arg(long, value_parser = parse_percent)]
    gst_rate: Option<Decimal>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the invoice here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `gst_core=trace`. Overrides RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&LogOptions {
        filter: cli.log_level,
        file: cli.log_file,
    })?;

    let sources = InvoiceSources {
        invoice: cli.invoice,
        items: cli.items,
        config: cli.config,
        gst_rate: cli.gst_rate,
    };

    debug!(?sources, format = ?cli.format, "building invoice");
    let invoice = app::build_invoice(&sources)?;
    let document = cli.format.renderer().render(&invoice)?;
    app::write_output(&document, cli.output.as_deref())?;

    Ok(())
}
