//! Hospitalization series: case outcomes by date.
//!
//! Same suppression rule as the case series: a listed date without a "Yes"
//! count is shown as [`SUPPRESSION_FLOOR`]. The "No" count is kept as
//! published and never backfilled.

use tracing::debug;

use covid_model::{
    DataFormatError, HOSPITALIZED_NO, HOSPITALIZED_YES, HospDay, HospSeries, ROLLING_WINDOW,
    RawHospitalizationRecord, SUPPRESSION_FLOOR,
};

use crate::pivot::pivot_by_date;
use crate::rolling::trailing_mean;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HospitalizationSeriesBuilder {
    window: usize,
    floor: u64,
}

impl Default for HospitalizationSeriesBuilder {
    fn default() -> Self {
        Self {
            window: ROLLING_WINDOW,
            floor: SUPPRESSION_FLOOR,
        }
    }
}

impl HospitalizationSeriesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn build(
        &self,
        records: &[RawHospitalizationRecord],
    ) -> Result<HospSeries, DataFormatError> {
        let pivot = pivot_by_date(records)?;

        let hospitalized: Vec<u64> = pivot
            .values()
            .map(|counts| counts.get_or_floor(HOSPITALIZED_YES, self.floor))
            .collect();
        let values: Vec<Option<f64>> = hospitalized
            .iter()
            .map(|count| Some(*count as f64))
            .collect();
        let averages = trailing_mean(&values, self.window);

        let rows: Vec<HospDay> = pivot
            .iter()
            .zip(hospitalized)
            .zip(averages)
            .map(|(((date, counts), hospitalized_count), hospitalized_avg_7d)| HospDay {
                date: *date,
                hospitalized_count,
                not_hospitalized_count: counts.get(HOSPITALIZED_NO),
                hospitalized_avg_7d,
            })
            .collect();

        debug!(dates = rows.len(), window = self.window, "built hospitalization series");
        Ok(HospSeries::new(rows))
    }
}
