//! Transaction records as they arrive from the CSV boundary.

use crate::error::ParseError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Date-only layouts accepted for the `date` column.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

/// Date-time layouts accepted for the `date` column; the time is discarded.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// One retail transaction.
///
/// Fields hold the raw text of the cleaned CSV row. Typed values are parsed on
/// demand so that a malformed column only affects the operations that read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub transaction_id: Option<String>,
    pub date: Option<String>,
    pub customer_id: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub product_category: Option<String>,
    pub quantity: Option<String>,
    pub price_per_unit: Option<String>,
    pub total_amount: Option<String>,
}

impl Record {
    /// Create a record with the two fields the aggregator needs.
    pub fn new(date: impl Into<String>, total_amount: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            total_amount: Some(total_amount.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_category = Some(category.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_age(mut self, age: impl Into<String>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn with_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Transaction date.
    pub fn parsed_date(&self) -> Result<NaiveDate, ParseError> {
        let raw = non_blank(self.date.as_deref()).ok_or(ParseError::MissingField("date"))?;
        parse_date(raw)
    }

    /// Transaction total; must be finite and non-negative.
    pub fn parsed_amount(&self) -> Result<f64, ParseError> {
        let raw = non_blank(self.total_amount.as_deref())
            .ok_or(ParseError::MissingField("total_amount"))?;
        let amount = parse_number(raw).ok_or_else(|| ParseError::InvalidAmount(raw.to_string()))?;
        if amount < 0.0 {
            return Err(ParseError::NegativeAmount(amount));
        }
        Ok(amount)
    }

    /// Both fields the monthly aggregation needs.
    pub fn sale(&self) -> Result<(NaiveDate, f64), ParseError> {
        Ok((self.parsed_date()?, self.parsed_amount()?))
    }

    /// Customer age, when present and numeric.
    pub fn parsed_age(&self) -> Option<f64> {
        non_blank(self.age.as_deref()).and_then(parse_number)
    }

    /// Value of a named column, for the cleaning pass.
    pub(crate) fn field(&self, column: &str) -> Option<&str> {
        let value = match column {
            "transaction_id" => &self.transaction_id,
            "date" => &self.date,
            "customer_id" => &self.customer_id,
            "gender" => &self.gender,
            "age" => &self.age,
            "product_category" => &self.product_category,
            "quantity" => &self.quantity,
            "price_per_unit" => &self.price_per_unit,
            "total_amount" => &self.total_amount,
            _ => return None,
        };
        non_blank(value.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an ISO-8601 or common locale date string.
///
/// # Example
/// ```
/// use retail_forecast::data::parse_date;
///
/// let date = parse_date("2023-01-05").unwrap();
/// assert_eq!(date.to_string(), "2023-01-05");
/// assert!(parse_date("not a date").is_err());
/// ```
pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    let raw = raw.trim();

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Ok(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))
}
