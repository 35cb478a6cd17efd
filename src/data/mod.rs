//! Input and output boundary: records, CSV loading and cleaning, export.

mod export;
mod loader;
mod record;

pub use export::{save_records, write_forecast_csv, write_records, write_series_csv};
pub use loader::{
    clean_column_name, clean_records, load_records, read_records, read_records_with,
    validate_columns, CleaningOptions, ESSENTIAL_COLUMNS, REQUIRED_COLUMNS,
};
pub use record::{parse_date, Record};
