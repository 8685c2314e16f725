pub mod config;
pub mod document;
pub mod loader;

pub use config::{ConfigError, load_gst_config, parse_gst_config};
pub use document::{DocumentError, InvoiceDocument};
pub use loader::{LineItemLoader, LineItemLoaderError, LineItemRecord};
