//! Aggregation of transaction records into series and summary tables.

mod groups;
mod monthly;

pub use groups::{
    age_histogram, group_totals, histogram, GroupKey, GroupTotal, HistogramBin,
    DEFAULT_HISTOGRAM_BINS,
};
pub use monthly::{aggregate, monthly_series};
