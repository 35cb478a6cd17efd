//! Grouped sales summaries and histograms.

use crate::data::Record;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default number of bins for [`age_histogram`].
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// Categorical column to group sales by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Product category; rows without one count as `Unknown`.
    ProductCategory,
    /// Customer gender; rows without one are skipped.
    Gender,
}

impl GroupKey {
    fn key_of(&self, record: &Record) -> Option<String> {
        match self {
            GroupKey::ProductCategory => Some(
                record
                    .field("product_category")
                    .unwrap_or("Unknown")
                    .to_string(),
            ),
            GroupKey::Gender => record.field("gender").map(str::to_string),
        }
    }
}

/// Total sales for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: f64,
    pub count: usize,
}

/// Sum valid `total_amount`s per group.
///
/// Categories come back largest first; genders smallest first.
pub fn group_totals(records: &[Record], key: GroupKey) -> Vec<GroupTotal> {
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for record in records {
        let Ok(amount) = record.parsed_amount() else {
            continue;
        };
        if let Some(k) = key.key_of(record) {
            let entry = groups.entry(k).or_insert((0.0, 0));
            entry.0 += amount;
            entry.1 += 1;
        }
    }

    let mut totals: Vec<GroupTotal> = groups
        .into_iter()
        .map(|(key, (total, count))| GroupTotal { key, total, count })
        .collect();

    match key {
        GroupKey::ProductCategory => totals.sort_by(|a, b| b.total.total_cmp(&a.total)),
        GroupKey::Gender => totals.sort_by(|a, b| a.total.total_cmp(&b.total)),
    }
    totals
}

/// One equal-width histogram bin. The last bin includes its upper edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over the finite values.
///
/// A constant input is spread over `[v - 0.5, v + 0.5]`.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if bins == 0 || finite.is_empty() {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for v in &finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins {
                hi
            } else {
                lo + width * (i + 1) as f64
            },
            count,
        })
        .collect()
}

/// Histogram of customer ages; rows without a numeric age are skipped.
pub fn age_histogram(records: &[Record], bins: usize) -> Vec<HistogramBin> {
    let ages: Vec<f64> = records.iter().filter_map(Record::parsed_age).collect();
    histogram(&ages, bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sales() -> Vec<Record> {
        vec![
            Record::new("2023-01-01", "100")
                .with_category("Beauty")
                .with_gender("Female")
                .with_age("25"),
            Record::new("2023-01-02", "300")
                .with_category("Electronics")
                .with_gender("Male")
                .with_age("40"),
            Record::new("2023-01-03", "50")
                .with_category("Beauty")
                .with_gender("Male")
                .with_age("33"),
            Record::new("2023-01-04", "20").with_age("61"),
            Record::new("2023-01-05", "bad")
                .with_category("Clothing")
                .with_gender("Female"),
        ]
    }

    #[test]
    fn category_totals_are_descending() {
        let totals = group_totals(&sales(), GroupKey::ProductCategory);
        let keys: Vec<_> = totals.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["Electronics", "Beauty", "Unknown"]);
        assert_relative_eq!(totals[1].total, 150.0);
        assert_eq!(totals[1].count, 2);
    }

    #[test]
    fn gender_totals_are_ascending_and_skip_missing() {
        let totals = group_totals(&sales(), GroupKey::Gender);
        let keys: Vec<_> = totals.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["Female", "Male"]);
        assert_relative_eq!(totals[0].total, 100.0);
        assert_relative_eq!(totals[1].total, 350.0);
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (18..=64).map(|a| a as f64).collect();
        let bins = histogram(&values, DEFAULT_HISTOGRAM_BINS);

        assert_eq!(bins.len(), DEFAULT_HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_relative_eq!(bins[0].lower, 18.0);
        assert_relative_eq!(bins.last().unwrap().upper, 64.0);
        // The maximum lands in the closed last bin.
        assert!(bins.last().unwrap().count >= 1);
    }

    #[test]
    fn histogram_of_constant_values() {
        let bins = histogram(&[5.0, 5.0, 5.0], 2);
        assert_eq!(bins.len(), 2);
        assert_relative_eq!(bins[0].lower, 4.5);
        assert_relative_eq!(bins[1].upper, 5.5);
        assert_eq!(bins[1].count, 3);
    }

    #[test]
    fn histogram_edge_cases() {
        assert!(histogram(&[], 10).is_empty());
        assert!(histogram(&[1.0, 2.0], 0).is_empty());
        assert!(histogram(&[f64::NAN], 3).is_empty());
    }

    #[test]
    fn age_histogram_skips_missing_ages() {
        let bins = age_histogram(&sales(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
    }
}
