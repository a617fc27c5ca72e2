//! Long-to-wide pivot of category counts by date.
//!
//! The result is an explicit category -> count mapping per date. A category
//! that never appeared for a date is absent; a category that appeared with
//! an empty count is present but has no value. Builders apply the
//! suppression floor on top of this mapping.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use covid_model::{CategoryCount, DataFormatError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    counts: BTreeMap<String, Option<u64>>,
}

impl CategoryCounts {
    /// Count for `category`; `None` when absent or published without a value.
    pub fn get(&self, category: &str) -> Option<u64> {
        self.counts.get(category).copied().flatten()
    }

    /// Count for `category`, or `floor` when the source withheld it.
    pub fn get_or_floor(&self, category: &str, floor: u64) -> u64 {
        self.get(category).unwrap_or(floor)
    }

    fn insert(&mut self, category: &str, count: Option<u64>) -> bool {
        if self.counts.contains_key(category) {
            return false;
        }
        self.counts.insert(category.to_string(), count);
        true
    }
}

/// Group records by date, dropping records without a date.
///
/// Dates come back in ascending order. A repeated `(date, category)` pair is
/// rejected.
pub fn pivot_by_date<R: CategoryCount>(
    records: &[R],
) -> Result<BTreeMap<NaiveDate, CategoryCounts>, DataFormatError> {
    let mut by_date: BTreeMap<NaiveDate, CategoryCounts> = BTreeMap::new();
    let mut dropped = 0usize;
    for record in records {
        let Some(date) = record.date() else {
            dropped += 1;
            continue;
        };
        let counts = by_date.entry(date).or_default();
        if !counts.insert(record.category(), record.count()) {
            return Err(DataFormatError::DuplicateEntry {
                date,
                category: record.category().to_string(),
            });
        }
    }
    debug!(
        records = records.len(),
        dates = by_date.len(),
        dropped_null_dates = dropped,
        "pivoted records by date"
    );
    Ok(by_date)
}
