use chrono::NaiveDate;
use thiserror::Error;

/// A source table that does not have the shape the builders expect.
///
/// These errors are not recoverable: the load that raised one is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataFormatError {
    /// An expected column is missing from the source header.
    #[error("required column '{column}' not found in {source_name}")]
    MissingColumn { column: String, source_name: String },

    /// A count cell holds something other than a non-negative integer.
    #[error("invalid count '{value}' on line {line} of {source_name}")]
    InvalidCount {
        value: String,
        line: u64,
        source_name: String,
    },

    /// The same (date, category) pair appears more than once.
    #[error("duplicate '{category}' entry for {date}")]
    DuplicateEntry { date: NaiveDate, category: String },

    /// Series rows are not strictly ascending by date.
    #[error("series row dated {date} does not follow {previous}")]
    UnorderedDates {
        previous: NaiveDate,
        date: NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, DataFormatError>;
