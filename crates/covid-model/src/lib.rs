//! Data model for the COVID trends dashboard.
//!
//! - **records**: raw long-format rows as published by the source
//! - **series**: date-indexed series with derived statistics
//! - **bands**: severity bands for the dashboard metrics
//! - **error**: [`DataFormatError`] for sources with an unexpected shape

pub mod bands;
pub mod error;
pub mod records;
pub mod series;

pub use bands::{
    Band, BandScale, CASE_BANDS, HOSPITALIZATION_BANDS, PERCENT_POSITIVE_BANDS, Severity,
};
pub use error::{DataFormatError, Result};
pub use records::{
    CategoryCount, HOSPITALIZED_NO, HOSPITALIZED_YES, NEGATIVE_RESULT, POSITIVE_RESULT,
    RawCaseRecord, RawHospitalizationRecord,
};
pub use series::{
    CHANGE_LAG, CaseColumn, CaseDay, CaseSeries, DailySeries, DayRow, HospColumn, HospDay,
    HospSeries, ROLLING_WINDOW, SUPPRESSION_FLOOR,
};
