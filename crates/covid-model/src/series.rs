//! Date-indexed series produced by the builders.
//!
//! A [`DailySeries`] is an immutable, strictly date-ascending list of day
//! rows. Derived values that cannot be computed yet (short history, zero
//! denominator) are `None`, which is distinct from zero everywhere: in
//! arithmetic, in exports and in window queries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DataFormatError;

/// Published counts below this value are withheld by the source. An absent
/// positive or hospitalized count is treated as exactly this value.
pub const SUPPRESSION_FLOOR: u64 = 5;

/// Number of rows in the trailing rolling mean.
pub const ROLLING_WINDOW: usize = 7;

/// Row offset used for the ten-day change columns.
pub const CHANGE_LAG: usize = 10;

/// A row of a [`DailySeries`] with named, numerically queryable columns.
pub trait DayRow {
    type Column: Copy + fmt::Debug;

    fn date(&self) -> NaiveDate;

    /// Value of `column` on this row, `None` when undefined.
    fn value(&self, column: Self::Column) -> Option<f64>;
}

/// Strictly date-ascending collection of day rows.
///
/// Deserialization goes through [`DailySeries::try_from_rows`], so a
/// decoded series holds the same ordering guarantee as a built one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DailySeries<R> {
    rows: Vec<R>,
}

impl<R> Default for DailySeries<R> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<R: DayRow> DailySeries<R> {
    /// Wrap rows that are already strictly ascending by date.
    pub fn new(rows: Vec<R>) -> Self {
        debug_assert!(
            rows.windows(2).all(|pair| pair[0].date() < pair[1].date()),
            "series rows must be strictly ascending by date"
        );
        Self { rows }
    }

    /// Wrap rows, rejecting any date that is not after the one before it.
    pub fn try_from_rows(rows: Vec<R>) -> Result<Self, DataFormatError> {
        if let Some(pair) = rows
            .windows(2)
            .find(|pair| pair[0].date() >= pair[1].date())
        {
            return Err(DataFormatError::UnorderedDates {
                previous: pair[0].date(),
                date: pair[1].date(),
            });
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn latest(&self) -> Option<&R> {
        self.rows.last()
    }

    /// Row for `date`, if the source had one.
    pub fn get(&self, date: NaiveDate) -> Option<&R> {
        self.rows
            .binary_search_by_key(&date, R::date)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// The last `n` rows (all rows when the series is shorter).
    pub fn tail(&self, n: usize) -> &[R] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    /// Every value of `column` in date order.
    pub fn values(&self, column: R::Column) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.value(column)).collect()
    }

    /// Maximum defined value of `column` within the last `n` rows.
    ///
    /// Undefined entries are skipped; returns `None` when the window holds
    /// no defined value at all.
    pub fn max_in_last(&self, column: R::Column, n: usize) -> Option<f64> {
        self.tail(n)
            .iter()
            .filter_map(|row| row.value(column))
            .filter(|value| !value.is_nan())
            .fold(None, |acc: Option<f64>, value| {
                Some(acc.map_or(value, |current| current.max(value)))
            })
    }
}

impl<'de, R> Deserialize<'de> for DailySeries<R>
where
    R: DayRow + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<R>::deserialize(deserializer)?;
        Self::try_from_rows(rows).map_err(serde::de::Error::custom)
    }
}

impl<'a, R> IntoIterator for &'a DailySeries<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ============================================================================
// Cases
// ============================================================================

/// One calendar date of test results with derived statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDay {
    pub date: NaiveDate,
    /// Positive tests; [`SUPPRESSION_FLOOR`] when the source omitted it.
    pub positive_count: u64,
    /// Negative tests. Never backfilled.
    pub negative_count: Option<u64>,
    pub percent_positive: Option<f64>,
    pub positive_avg_7d: Option<f64>,
    pub percent_positive_avg_7d: Option<f64>,
    pub ten_days_prior: Option<f64>,
    pub ten_day_difference: Option<f64>,
    pub ten_day_percent_change: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseColumn {
    PositiveCount,
    NegativeCount,
    PercentPositive,
    PositiveAvg7d,
    PercentPositiveAvg7d,
    TenDaysPrior,
    TenDayDifference,
    TenDayPercentChange,
}

impl CaseColumn {
    pub const ALL: [CaseColumn; 8] = [
        CaseColumn::PositiveCount,
        CaseColumn::NegativeCount,
        CaseColumn::PercentPositive,
        CaseColumn::PositiveAvg7d,
        CaseColumn::PercentPositiveAvg7d,
        CaseColumn::TenDaysPrior,
        CaseColumn::TenDayDifference,
        CaseColumn::TenDayPercentChange,
    ];

    /// Column name used in exported tables.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PositiveCount => "positive_count",
            Self::NegativeCount => "negative_count",
            Self::PercentPositive => "percent_positive",
            Self::PositiveAvg7d => "positive_avg_7d",
            Self::PercentPositiveAvg7d => "percent_positive_avg_7d",
            Self::TenDaysPrior => "ten_days_prior",
            Self::TenDayDifference => "ten_day_difference",
            Self::TenDayPercentChange => "ten_day_percent_change",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PositiveCount => "Positive",
            Self::NegativeCount => "Negative",
            Self::PercentPositive => "% Positive",
            Self::PositiveAvg7d => "Positive (7d avg)",
            Self::PercentPositiveAvg7d => "% Positive (7d avg)",
            Self::TenDaysPrior => "10 days prior",
            Self::TenDayDifference => "10-day diff",
            Self::TenDayPercentChange => "10-day % change",
        }
    }
}

impl DayRow for CaseDay {
    type Column = CaseColumn;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn value(&self, column: CaseColumn) -> Option<f64> {
        match column {
            CaseColumn::PositiveCount => Some(self.positive_count as f64),
            CaseColumn::NegativeCount => self.negative_count.map(|count| count as f64),
            CaseColumn::PercentPositive => self.percent_positive,
            CaseColumn::PositiveAvg7d => self.positive_avg_7d,
            CaseColumn::PercentPositiveAvg7d => self.percent_positive_avg_7d,
            CaseColumn::TenDaysPrior => self.ten_days_prior,
            CaseColumn::TenDayDifference => self.ten_day_difference,
            CaseColumn::TenDayPercentChange => self.ten_day_percent_change,
        }
    }
}

pub type CaseSeries = DailySeries<CaseDay>;

// ============================================================================
// Hospitalizations
// ============================================================================

/// One calendar date of hospitalization counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospDay {
    pub date: NaiveDate,
    /// Hospitalized cases; [`SUPPRESSION_FLOOR`] when the source omitted it.
    pub hospitalized_count: u64,
    /// Cases not hospitalized. Never backfilled.
    pub not_hospitalized_count: Option<u64>,
    pub hospitalized_avg_7d: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HospColumn {
    HospitalizedCount,
    NotHospitalizedCount,
    HospitalizedAvg7d,
}

impl HospColumn {
    pub const ALL: [HospColumn; 3] = [
        HospColumn::HospitalizedCount,
        HospColumn::NotHospitalizedCount,
        HospColumn::HospitalizedAvg7d,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::HospitalizedCount => "hospitalized_count",
            Self::NotHospitalizedCount => "not_hospitalized_count",
            Self::HospitalizedAvg7d => "hospitalized_avg_7d",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HospitalizedCount => "Hospitalized",
            Self::NotHospitalizedCount => "Not hospitalized",
            Self::HospitalizedAvg7d => "Hospitalized (7d avg)",
        }
    }
}

impl DayRow for HospDay {
    type Column = HospColumn;

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn value(&self, column: HospColumn) -> Option<f64> {
        match column {
            HospColumn::HospitalizedCount => Some(self.hospitalized_count as f64),
            HospColumn::NotHospitalizedCount => {
                self.not_hospitalized_count.map(|count| count as f64)
            }
            HospColumn::HospitalizedAvg7d => self.hospitalized_avg_7d,
        }
    }
}

pub type HospSeries = DailySeries<HospDay>;
