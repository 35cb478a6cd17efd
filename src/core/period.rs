//! Calendar month periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, represented by its first day.
///
/// Periods are totally ordered and can be stepped forwards or backwards by
/// whole months without ever leaving the first-of-month representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(NaiveDate);

impl Period {
    /// Create a period from a year and a 1-based month.
    pub fn from_ymd(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Truncate a date to the month it falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        // Day 1 of an existing month always exists.
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The first day of the month.
    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-based month number.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Absolute month count since year 0, used for calendar arithmetic.
    pub fn month_index(&self) -> i64 {
        self.0.year() as i64 * 12 + self.0.month0() as i64
    }

    /// Position within the year, 0 for January.
    pub fn month_of_year(&self) -> u32 {
        self.0.month0()
    }

    fn from_month_index(index: i64) -> Option<Self> {
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        let month = index.rem_euclid(12) as u32 + 1;
        Self::from_ymd(year, month)
    }

    /// Shift by a signed number of months.
    pub fn offset(&self, months: i64) -> Option<Self> {
        Self::from_month_index(self.month_index().checked_add(months)?)
    }

    /// The following month.
    pub fn succ(&self) -> Option<Self> {
        self.offset(1)
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: &Period) -> i64 {
        other.month_index() - self.month_index()
    }

    /// Iterate over every month from `self` through `end`, inclusive.
    pub fn range_inclusive(self, end: Period) -> impl Iterator<Item = Period> {
        let count = self.months_until(&end).max(-1) + 1;
        (0..count).filter_map(move |i| self.offset(i))
    }
}

impl From<NaiveDate> for Period {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
