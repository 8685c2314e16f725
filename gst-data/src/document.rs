//! TOML invoice documents.
//!
//! A document is the saved form: header, buyer and items, with optional
//! overrides for the seller profile, bank and terms. Dates are quoted
//! ISO strings.
//!
//! ```toml
//! [header]
//! invoice_no = "MI/2025/014"
//! date = "2025-04-01"
//! payment_terms = "30 days"
//!
//! [buyer]
//! name = "Shree Traders"
//! gstin = "27AAACS1234F1Z5"
//!
//! [[items]]
//! description = "MS Brackets"
//! hsn_code = "7326"
//! quantity = 2
//! rate = 100
//! ```

use std::path::{Path, PathBuf};

use gst_core::InvoiceData;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid invoice document: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loader for TOML invoice documents.
pub struct InvoiceDocument;

impl InvoiceDocument {
    /// Parse an invoice document. Missing sections take the form defaults
    /// and item ids are renumbered from 1 in document order.
    pub fn from_toml_str(input: &str) -> Result<InvoiceData, DocumentError> {
        let mut data: InvoiceData = toml::from_str(input)?;
        let items = std::mem::take(&mut data.items);
        data.replace_items(items);
        Ok(data)
    }

    /// Read and parse the document at `path`.
    pub fn from_path(path: &Path) -> Result<InvoiceData, DocumentError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data = Self::from_toml_str(&contents)?;
        debug!(
            path = %path.display(),
            invoice_no = %data.header.invoice_no,
            items = data.items.len(),
            "loaded invoice document"
        );
        Ok(data)
    }
}
