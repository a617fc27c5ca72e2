//! Derivations over raw COVID records.
//!
//! Records are pivoted by date, suppressed counts are backfilled, and
//! row-indexed rolling statistics are computed. [`DailyCache`] memoizes the
//! result for the current day.

pub mod cache;
pub mod cases;
pub mod frame;
pub mod hospitalizations;
pub mod pivot;
pub mod rolling;

pub use cache::{Clock, DailyCache, FixedClock, SystemClock};
pub use cases::CaseSeriesBuilder;
pub use frame::{case_frame, hospitalization_frame, write_frame_csv};
pub use hospitalizations::HospitalizationSeriesBuilder;
pub use pivot::{CategoryCounts, pivot_by_date};
pub use rolling::{difference, lagged, percent_change, percent_of_total, trailing_mean};
