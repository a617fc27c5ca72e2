//! End-to-end loaders: acquire a source body, then parse its records.

use std::fmt;

use chrono::NaiveDate;
use tracing::info_span;

use covid_model::{RawCaseRecord, RawHospitalizationRecord};

use crate::csv_table::read_csv_table;
use crate::error::Result;
use crate::records::{parse_case_records, parse_hospitalization_records};
use crate::source::{Source, SourceClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Cases,
    Hospitalizations,
}

impl Dataset {
    /// Stable name, used for cache entries and export files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Hospitalizations => "hospitalizations",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn load_case_records(
    client: &SourceClient,
    source: &Source,
    today: NaiveDate,
) -> Result<Vec<RawCaseRecord>> {
    let span = info_span!("load", dataset = Dataset::Cases.name(), source = %source);
    let _guard = span.enter();
    let body = client.fetch_text(Dataset::Cases.name(), source, today)?;
    let table = read_csv_table(&body, &source.to_string())?;
    Ok(parse_case_records(&table)?)
}

pub fn load_hospitalization_records(
    client: &SourceClient,
    source: &Source,
    today: NaiveDate,
) -> Result<Vec<RawHospitalizationRecord>> {
    let span = info_span!(
        "load",
        dataset = Dataset::Hospitalizations.name(),
        source = %source
    );
    let _guard = span.enter();
    let body = client.fetch_text(Dataset::Hospitalizations.name(), source, today)?;
    let table = read_csv_table(&body, &source.to_string())?;
    Ok(parse_hospitalization_records(&table)?)
}
