//! CSV import of invoice line items.
//!
//! | Column        | Required | Notes                                  |
//! |---------------|----------|----------------------------------------|
//! | `description` | yes      |                                        |
//! | `hsn_code`    | yes      | may be empty                           |
//! | `quantity`    | yes      | decimal                                |
//! | `rate`        | yes      | unit rate in rupees                    |
//! | `gst_rate`    | no       | percent, empty or missing means 5      |
//! | `unit`        | no       | empty or missing means `Nos`           |
//!
//! ```csv
//! description,hsn_code,quantity,rate,gst_rate,unit
//! MS Brackets,7326,2,100,5,Nos
//! Hex bolts,7318,1,50,,Kg
//! ```

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use gst_core::{DEFAULT_GST_RATE, DEFAULT_UNIT, InvoiceItem};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading line items.
#[derive(Debug, Error)]
pub enum LineItemLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for LineItemLoaderError {
    fn from(err: csv::Error) -> Self {
        LineItemLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of the line items CSV.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LineItemRecord {
    pub description: String,
    pub hsn_code: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub quantity: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub gst_rate: Option<Decimal>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Parses the cell text directly so digits and scale survive intact.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl LineItemRecord {
    /// Converts the record into an invoice item with the given id.
    pub fn into_item(
        self,
        id: u32,
    ) -> InvoiceItem {
        InvoiceItem {
            id,
            description: self.description,
            hsn_code: self.hsn_code,
            gst_rate: self.gst_rate.unwrap_or(DEFAULT_GST_RATE),
            quantity: self.quantity,
            rate: self.rate,
            unit: self
                .unit
                .filter(|unit| !unit.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        }
    }
}

/// Loader for line items from CSV.
pub struct LineItemLoader;

impl LineItemLoader {
    /// Parse line item records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<LineItemRecord>, LineItemLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: LineItemRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse records and number them from 1 as invoice items.
    pub fn parse_items<R: Read>(reader: R) -> Result<Vec<InvoiceItem>, LineItemLoaderError> {
        let items = Self::parse(reader)?
            .into_iter()
            .zip(1..)
            .map(|(record, id)| record.into_item(id))
            .collect();
        Ok(items)
    }

    /// Read and parse the CSV file at `path`.
    pub fn from_path(path: &Path) -> Result<Vec<InvoiceItem>, LineItemLoaderError> {
        let file = File::open(path).map_err(|source| LineItemLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let items = Self::parse_items(file)?;
        debug!(path = %path.display(), count = items.len(), "loaded line items");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = "\
description,hsn_code,quantity,rate,gst_rate,unit
MS Brackets,7326,2,100,5,Nos
Hex bolts,7318,1,50,,Kg
Labour charges,9987,3.5,400.00,18,
";

    #[test]
    fn test_parse_csv_single_item() {
        let csv = "description,hsn_code,quantity,rate,gst_rate,unit\nMS Brackets,7326,2,100,5,Nos";

        let records = LineItemLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            LineItemRecord {
                description: "MS Brackets".to_string(),
                hsn_code: "7326".to_string(),
                quantity: dec!(2),
                rate: dec!(100),
                gst_rate: Some(dec!(5)),
                unit: Some("Nos".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_csv_empty_optional_cells() {
        let records = LineItemLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].gst_rate, None);
        assert_eq!(records[2].unit, None);
    }

    #[test]
    fn test_parse_csv_without_optional_columns() {
        let csv = "description,hsn_code,quantity,rate\nWashers,7318,100,0.75";

        let items = LineItemLoader::parse_items(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].gst_rate, dec!(5));
        assert_eq!(items[0].unit, "Nos");
        assert_eq!(items[0].quantity, dec!(100));
        assert_eq!(items[0].rate, dec!(0.75));
    }

    #[test]
    fn test_parse_items_numbers_from_one() {
        let items = LineItemLoader::parse_items(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let ids: Vec<u32> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(items[1].unit, "Kg");
        assert_eq!(items[2].unit, "Nos");
        assert_eq!(items[2].gst_rate, dec!(18));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let csv = "description,hsn_code,quantity,rate\n  Nuts , 7318 , 4 , 2.50 ";

        let records = LineItemLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].description, "Nuts");
        assert_eq!(records[0].hsn_code, "7318");
        assert_eq!(records[0].rate, dec!(2.50));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "description,quantity\nNuts,4";

        let result = LineItemLoader::parse(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let LineItemLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_keeps_full_precision_and_scale() {
        let csv = "description,hsn_code,quantity,rate\nShims,7326,12345678.123456789123,100.10";

        let records = LineItemLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].quantity, dec!(12345678.123456789123));
        assert_eq!(records[0].quantity.to_string(), "12345678.123456789123");
        assert_eq!(records[0].rate.to_string(), "100.10");
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "description,hsn_code,quantity,rate\nNuts,7318,four,2.50";

        let result = LineItemLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(LineItemLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_invalid_gst_rate() {
        let csv = "description,hsn_code,quantity,rate,gst_rate\nNuts,7318,4,2.50,five";

        let result = LineItemLoader::parse(csv.as_bytes());

        assert!(matches!(result, Err(LineItemLoaderError::CsvParse(_))));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "description,hsn_code,quantity,rate\n";

        let records = LineItemLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let result = LineItemLoader::from_path(Path::new("does/not/exist.csv"));

        assert!(matches!(result, Err(LineItemLoaderError::Io { .. })));
    }
}
