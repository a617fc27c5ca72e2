//! Source acquisition and parsing for the COVID trends dashboard.
//!
//! # Features
//!
//! - **Acquisition**: read a local CSV or download it from the open data portal
//! - **Same-day cache**: remote bodies are fetched at most once per calendar day
//! - **CSV tables**: trimmed string tables with case-insensitive column lookup
//! - **Records**: typed long-format records with null dates preserved
//!
//! # Example
//!
//! ```ignore
//! use covid_ingest::{Source, SourceClient, load_case_records};
//!
//! let client = SourceClient::new(None)?;
//! let records = load_case_records(&client, &Source::file("cases_by_date.csv"), today)?;
//! ```

mod cache;
mod csv_table;
mod dataset;
mod error;
mod records;
mod source;
mod values;

// === Error Types ===
pub use error::{ErrorKind, IngestError, Result};

// === Acquisition ===
pub use cache::SourceCache;
pub use source::{DEFAULT_CASES_URL, DEFAULT_HOSPITALIZATIONS_URL, Source, SourceClient};

// === CSV Reading ===
pub use csv_table::{CsvTable, read_csv_table};

// === Records ===
pub use dataset::{Dataset, load_case_records, load_hospitalization_records};
pub use records::{
    CASE_COLUMNS, HOSPITALIZATION_COLUMNS, parse_case_records, parse_hospitalization_records,
};
pub use values::{parse_count, parse_source_date};
