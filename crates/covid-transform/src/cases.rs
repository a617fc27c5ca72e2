//! Case series: test results by collection date.
//!
//! The source suppresses counts below five. When a date is listed but its
//! positive count is missing, the true value lies somewhere in `0..5` and is
//! displayed as exactly [`SUPPRESSION_FLOOR`]. Only the positive side is
//! backfilled; a missing negative count stays missing and leaves the percent
//! positive for that date undefined.

use tracing::debug;

use covid_model::{
    CHANGE_LAG, CaseDay, CaseSeries, DataFormatError, NEGATIVE_RESULT, POSITIVE_RESULT,
    ROLLING_WINDOW, RawCaseRecord, SUPPRESSION_FLOOR,
};

use crate::pivot::pivot_by_date;
use crate::rolling::{difference, lagged, percent_change, percent_of_total, trailing_mean};

/// Builds a [`CaseSeries`] from raw `collection_date | test_result | count`
/// records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseSeriesBuilder {
    window: usize,
    lag: usize,
    floor: u64,
}

impl Default for CaseSeriesBuilder {
    fn default() -> Self {
        Self {
            window: ROLLING_WINDOW,
            lag: CHANGE_LAG,
            floor: SUPPRESSION_FLOOR,
        }
    }
}

impl CaseSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rolling-mean length in rows.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Row offset for the ten-day change columns.
    #[must_use]
    pub fn with_lag(mut self, lag: usize) -> Self {
        self.lag = lag;
        self
    }

    /// Pivot, backfill and derive. Pure: the same input always yields the
    /// same series.
    pub fn build(&self, records: &[RawCaseRecord]) -> Result<CaseSeries, DataFormatError> {
        let pivot = pivot_by_date(records)?;

        let mut dates = Vec::with_capacity(pivot.len());
        let mut positives = Vec::with_capacity(pivot.len());
        let mut negatives = Vec::with_capacity(pivot.len());
        let mut backfilled = 0usize;
        for (date, counts) in &pivot {
            if counts.get(POSITIVE_RESULT).is_none() {
                backfilled += 1;
            }
            dates.push(*date);
            positives.push(counts.get_or_floor(POSITIVE_RESULT, self.floor));
            negatives.push(counts.get(NEGATIVE_RESULT));
        }

        let percent_positive: Vec<Option<f64>> = positives
            .iter()
            .zip(&negatives)
            .map(|(positive, negative)| percent_of_total(*positive, *negative))
            .collect();
        let positive_values: Vec<Option<f64>> =
            positives.iter().map(|count| Some(*count as f64)).collect();
        let positive_avg = trailing_mean(&positive_values, self.window);
        let percent_positive_avg = trailing_mean(&percent_positive, self.window);
        let prior = lagged(&positive_avg, self.lag);

        let rows = (0..dates.len())
            .map(|idx| CaseDay {
                date: dates[idx],
                positive_count: positives[idx],
                negative_count: negatives[idx],
                percent_positive: percent_positive[idx],
                positive_avg_7d: positive_avg[idx],
                percent_positive_avg_7d: percent_positive_avg[idx],
                ten_days_prior: prior[idx],
                ten_day_difference: difference(positive_avg[idx], prior[idx]),
                ten_day_percent_change: percent_change(positive_avg[idx], prior[idx]),
            })
            .collect::<Vec<_>>();

        debug!(
            dates = rows.len(),
            backfilled_positive = backfilled,
            window = self.window,
            lag = self.lag,
            "built case series"
        );
        Ok(CaseSeries::new(rows))
    }
}
