//! Severity bands drawn behind the dashboard metrics.
//!
//! Bands are half-open `[lower, upper)` ranges. A value at or above the
//! upper bound of the highest band saturates into that band, so an
//! unusually high reading is never reported as unbanded.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Red => "Red",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub severity: Severity,
}

impl Band {
    pub const fn new(lower: f64, upper: f64, severity: Severity) -> Self {
        Self {
            lower,
            upper,
            severity,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value < self.upper
    }
}

/// Ordered, contiguous set of bands for one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    pub name: &'static str,
    pub bands: &'static [Band],
}

impl BandScale {
    /// Severity for `value`, `None` when undefined or below the lowest band.
    pub fn classify(&self, value: Option<f64>) -> Option<Severity> {
        let value = value.filter(|value| !value.is_nan())?;
        if let Some(band) = self.bands.iter().find(|band| band.contains(value)) {
            return Some(band.severity);
        }
        self.bands
            .last()
            .filter(|top| value >= top.upper)
            .map(|top| top.severity)
    }
}

/// Bands for the 7-day average of positive tests.
pub const CASE_BANDS: BandScale = BandScale {
    name: "Positive tests (7d avg)",
    bands: &[
        Band::new(0.0, 100.0, Severity::Green),
        Band::new(100.0, 225.0, Severity::Yellow),
        Band::new(225.0, 500.0, Severity::Orange),
        Band::new(500.0, 4250.0, Severity::Red),
    ],
};

/// Bands for the 7-day average of percent positivity.
pub const PERCENT_POSITIVE_BANDS: BandScale = BandScale {
    name: "Percent positive (7d avg)",
    bands: &[
        Band::new(0.0, 2.0, Severity::Green),
        Band::new(2.0, 5.0, Severity::Yellow),
        Band::new(5.0, 10.0, Severity::Orange),
        Band::new(10.0, 50.0, Severity::Red),
    ],
};

/// Bands for the 7-day average of hospitalizations. There is no red band.
pub const HOSPITALIZATION_BANDS: BandScale = BandScale {
    name: "Hospitalizations (7d avg)",
    bands: &[
        Band::new(0.0, 50.0, Severity::Green),
        Band::new(50.0, 100.0, Severity::Yellow),
        Band::new(100.0, 200.0, Severity::Orange),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_half_open_ranges() {
        assert_eq!(CASE_BANDS.classify(Some(0.0)), Some(Severity::Green));
        assert_eq!(CASE_BANDS.classify(Some(99.9)), Some(Severity::Green));
        assert_eq!(CASE_BANDS.classify(Some(100.0)), Some(Severity::Yellow));
        assert_eq!(CASE_BANDS.classify(Some(499.0)), Some(Severity::Orange));
        assert_eq!(CASE_BANDS.classify(Some(500.0)), Some(Severity::Red));
    }

    #[test]
    fn saturates_above_the_top_band() {
        assert_eq!(CASE_BANDS.classify(Some(9000.0)), Some(Severity::Red));
        assert_eq!(
            HOSPITALIZATION_BANDS.classify(Some(350.0)),
            Some(Severity::Orange)
        );
    }

    #[test]
    fn undefined_and_negative_values_have_no_band() {
        assert_eq!(PERCENT_POSITIVE_BANDS.classify(None), None);
        assert_eq!(PERCENT_POSITIVE_BANDS.classify(Some(f64::NAN)), None);
        assert_eq!(PERCENT_POSITIVE_BANDS.classify(Some(-1.0)), None);
    }
}
