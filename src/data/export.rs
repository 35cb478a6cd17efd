//! Tabular CSV output for cleaned records, monthly series and forecasts.

use crate::core::{ForecastResult, MonthlySeries};
use crate::data::Record;
use crate::error::DataError;
use csv::Writer;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

fn write_rows<W, T, I>(writer: W, rows: I) -> Result<(), DataError>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut wtr = Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write cleaned records with their normalized column names.
pub fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<(), DataError> {
    write_rows(writer, records)
}

/// Save cleaned records to `path`, creating parent directories as needed.
pub fn save_records(path: impl AsRef<Path>, records: &[Record]) -> Result<(), DataError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_records(File::create(path)?, records)?;
    debug!(path = %path.display(), rows = records.len(), "saved cleaned records");
    Ok(())
}

/// Write a monthly series as `period,value` rows.
pub fn write_series_csv<W: Write>(writer: W, series: &MonthlySeries) -> Result<(), DataError> {
    write_rows(writer, series.points())
}

/// Write a forecast table, one row per period.
pub fn write_forecast_csv<W: Write>(writer: W, result: &ForecastResult) -> Result<(), DataError> {
    write_rows(writer, &result.points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Period;

    #[test]
    fn series_csv_has_period_and_value_columns() {
        let series =
            MonthlySeries::from_values(Period::from_ymd(2023, 1).unwrap(), vec![120.0, 95.5])
                .unwrap();

        let mut out = Vec::new();
        write_series_csv(&mut out, &series).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "period,value\n2023-01-01,120.0\n2023-02-01,95.5\n");
    }

    #[test]
    fn records_csv_keeps_blank_optionals() {
        let records = vec![Record::new("2023-01-05", "50").with_category("Beauty")];

        let mut out = Vec::new();
        write_records(&mut out, &records).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("transaction_id,date,customer_id,gender,age,product_category,quantity,price_per_unit,total_amount")
        );
        assert_eq!(lines.next(), Some(",2023-01-05,,,,Beauty,,,50"));
    }
}
