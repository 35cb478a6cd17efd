//! Monthly aggregation of transaction records.

use crate::core::{MonthlySeries, Period, TimeSeriesPoint};
use crate::data::Record;
use crate::error::Result;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Sum transaction totals per calendar month.
///
/// Records without a parseable date or a valid amount are dropped. The result
/// holds one point per month that has at least one valid record, in ascending
/// order; months without records are absent. A record whose amount would push
/// its month total past the largest finite value is dropped as well.
///
/// # Example
/// ```
/// use retail_forecast::aggregate::aggregate;
/// use retail_forecast::data::Record;
///
/// let points = aggregate(&[
///     Record::new("2023-01-05", "50"),
///     Record::new("2023-01-20", "70"),
/// ]);
/// assert_eq!(points.len(), 1);
/// assert_eq!(points[0].period.to_string(), "2023-01");
/// assert_eq!(points[0].value, 120.0);
/// ```
pub fn aggregate(records: &[Record]) -> Vec<TimeSeriesPoint> {
    let mut totals: BTreeMap<Period, f64> = BTreeMap::new();
    let mut dropped = 0usize;
    let mut overflowed = 0usize;

    for record in records {
        match record.sale() {
            Ok((date, amount)) => {
                let total = totals.entry(Period::from_date(date)).or_insert(0.0);
                if (*total + amount).is_finite() {
                    *total += amount;
                } else {
                    overflowed += 1;
                }
            }
            Err(_) => dropped += 1,
        }
    }

    if overflowed > 0 {
        warn!(
            overflowed,
            "dropped records whose amount overflows the monthly total"
        );
    }

    if dropped > 0 {
        debug!(
            dropped,
            total = records.len(),
            "dropped records without a valid date or amount"
        );
    }

    totals
        .into_iter()
        .map(|(period, value)| TimeSeriesPoint::new(period, value))
        .collect()
}

/// Aggregate into a validated [`MonthlySeries`].
pub fn monthly_series(records: &[Record]) -> Result<MonthlySeries> {
    MonthlySeries::new(aggregate(records))
}
