//! Raw long-format records as published by the source.
//!
//! Each record is a single `(date, category, count)` triple. A date that
//! could not be parsed is kept as `None` so the builders can discard it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category label for positive test results.
pub const POSITIVE_RESULT: &str = "positive";
/// Category label for negative test results.
pub const NEGATIVE_RESULT: &str = "negative";
/// Hospitalization flag for hospitalized cases.
pub const HOSPITALIZED_YES: &str = "Yes";
/// Hospitalization flag for cases that were not hospitalized.
pub const HOSPITALIZED_NO: &str = "No";

/// Shared view over raw records so the pivot can treat both sources alike.
pub trait CategoryCount {
    fn date(&self) -> Option<NaiveDate>;
    fn category(&self) -> &str;
    fn count(&self) -> Option<u64>;
}

/// One `collection_date | test_result | count` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCaseRecord {
    pub collection_date: Option<NaiveDate>,
    pub test_result: String,
    pub count: Option<u64>,
}

impl RawCaseRecord {
    pub fn new(
        collection_date: Option<NaiveDate>,
        test_result: impl Into<String>,
        count: Option<u64>,
    ) -> Self {
        Self {
            collection_date,
            test_result: test_result.into(),
            count,
        }
    }
}

impl CategoryCount for RawCaseRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.collection_date
    }

    fn category(&self) -> &str {
        &self.test_result
    }

    fn count(&self) -> Option<u64> {
        self.count
    }
}

/// One `date | hospitalized | count` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHospitalizationRecord {
    pub date: Option<NaiveDate>,
    pub hospitalized: String,
    pub count: Option<u64>,
}

impl RawHospitalizationRecord {
    pub fn new(date: Option<NaiveDate>, hospitalized: impl Into<String>, count: Option<u64>) -> Self {
        Self {
            date,
            hospitalized: hospitalized.into(),
            count,
        }
    }
}

impl CategoryCount for RawHospitalizationRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn category(&self) -> &str {
        &self.hospitalized
    }

    fn count(&self) -> Option<u64> {
        self.count
    }
}
