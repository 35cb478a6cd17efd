//! CSV loading, header normalization and basic cleaning.

use crate::data::Record;
use crate::error::DataError;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: &[&str] = &["date", "total_amount"];

/// Columns whose absence makes a row unusable, when the column exists.
pub const ESSENTIAL_COLUMNS: &[&str] = &[
    "transaction_id",
    "date",
    "product_category",
    "quantity",
    "total_amount",
];

/// Options for the cleaning pass applied after parsing.
#[derive(Debug, Clone)]
pub struct CleaningOptions {
    /// Drop rows with a blank essential field.
    pub drop_incomplete: bool,
    /// Category assigned to rows without one.
    pub unknown_category: String,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            drop_incomplete: true,
            unknown_category: "Unknown".to_string(),
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drop_incomplete(mut self, drop: bool) -> Self {
        self.drop_incomplete = drop;
        self
    }

    pub fn with_unknown_category(mut self, category: impl Into<String>) -> Self {
        self.unknown_category = category.into();
        self
    }
}

/// Normalize a CSV header: trim, lowercase, spaces to underscores, and strip
/// anything that is not a word character or whitespace.
///
/// # Example
/// ```
/// use retail_forecast::data::clean_column_name;
///
/// assert_eq!(clean_column_name(" Total Amount ($) "), "total_amount_");
/// assert_eq!(clean_column_name("Price per Unit"), "price_per_unit");
/// ```
pub fn clean_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Check the schema contract once, before any row is read.
pub fn validate_columns(columns: &[String]) -> Result<(), DataError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|c| c == *required))
        .map(|c| c.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::MissingColumns(missing))
    }
}

/// Load and clean records from a CSV file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<Record>, DataError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    debug!(path = %path.display(), "loading sales records");
    read_records(BufReader::new(file))
}

/// Read and clean records from any CSV source with default options.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<Record>, DataError> {
    read_records_with(reader, &CleaningOptions::default())
}

/// Read and clean records from any CSV source.
pub fn read_records_with<R: Read>(
    reader: R,
    options: &CleaningOptions,
) -> Result<Vec<Record>, DataError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(clean_column_name).collect();
    validate_columns(&columns)?;
    reader.set_headers(StringRecord::from(columns.clone()));

    let mut records = Vec::new();
    let mut malformed = 0usize;
    for result in reader.deserialize::<Record>() {
        match result {
            Ok(record) => records.push(record),
            Err(error) => {
                malformed += 1;
                warn!("skipping malformed csv row: {error}");
            }
        }
    }

    let read = records.len();
    let records = clean_records(records, &columns, options);
    debug!(
        rows = read + malformed,
        malformed,
        incomplete = read - records.len(),
        kept = records.len(),
        "sales records loaded"
    );

    Ok(records)
}

/// Drop incomplete rows and fill missing categories.
///
/// Only essential columns present in `columns` are enforced.
pub fn clean_records(
    records: Vec<Record>,
    columns: &[String],
    options: &CleaningOptions,
) -> Vec<Record> {
    let essential: Vec<&str> = ESSENTIAL_COLUMNS
        .iter()
        .copied()
        .filter(|e| columns.iter().any(|c| c == e))
        .collect();
    let has_category = columns.iter().any(|c| c == "product_category");

    records
        .into_iter()
        .filter(|record| {
            !options.drop_incomplete || essential.iter().all(|col| record.field(col).is_some())
        })
        .map(|mut record| {
            if has_category && record.field("product_category").is_none() {
                record.product_category = Some(options.unknown_category.clone());
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Transaction ID,Date,Customer ID,Gender,Age,Product Category,Quantity,Price per Unit,Total Amount
1,2023-11-24,CUST001,Male,34,Beauty,3,50,150
2,2023-02-27,CUST002,Female,26,Clothing,2,500,1000
3,2023-01-13,CUST003,Male,50,Electronics,1,30,30
4,,CUST004,Male,37,Clothing,1,500,500
5,2023-05-21,CUST005,Male,30,,2,50,100
";

    #[test]
    fn clean_column_name_normalizes_headers() {
        assert_eq!(clean_column_name("Transaction ID"), "transaction_id");
        assert_eq!(clean_column_name("  Date"), "date");
        assert_eq!(clean_column_name("Total-Amount"), "totalamount");
        assert_eq!(clean_column_name("Price per Unit"), "price_per_unit");
    }

    #[test]
    fn reads_and_drops_incomplete_rows() {
        let records = read_records(SAMPLE.as_bytes()).unwrap();

        // Row 4 lacks a date and row 5 a category.
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].transaction_id.as_deref(), Some("1"));
        assert_eq!(records[1].gender.as_deref(), Some("Female"));
        assert_eq!(records[2].total_amount.as_deref(), Some("30"));
    }

    #[test]
    fn keeps_incomplete_rows_when_asked() {
        let options = CleaningOptions::new()
            .with_drop_incomplete(false)
            .with_unknown_category("Other");
        let records = read_records_with(SAMPLE.as_bytes(), &options).unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[3].date, None);
        assert_eq!(records[4].product_category.as_deref(), Some("Other"));
    }

    #[test]
    fn missing_required_columns_fail_once() {
        let csv = "Date,Quantity\n2023-01-01,3\n";
        match read_records(csv.as_bytes()) {
            Err(DataError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["total_amount".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn minimal_schema_is_enough() {
        let csv = "date,total_amount\n2023-01-05,50\n2023-01-20,70\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_category, None);
    }

    #[test]
    fn malformed_values_survive_loading() {
        // Parsing happens later; the loader only enforces presence.
        let csv = "date,total_amount\nnot-a-date,abc\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].sale().is_err());
    }

    #[test]
    fn short_rows_are_tolerated() {
        let csv = "date,total_amount,gender\n2023-01-05,50\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gender, None);
    }
}
