//! Error types for source acquisition and parsing.

use covid_model::DataFormatError;
use thiserror::Error;

/// Errors that can occur while loading a source dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Acquisition Errors ===
    /// The file could not be read or the HTTP request failed.
    #[error("source {source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    // === Format Errors ===
    /// The body is not valid CSV.
    #[error("failed to parse CSV {source_name}: {message}")]
    CsvParse {
        source_name: String,
        message: String,
    },

    /// The CSV parsed but its columns or values have the wrong shape.
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),
}

/// Coarse classification used by callers that only care about recoverability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    DataFormat,
}

impl IngestError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceUnavailable { .. } => ErrorKind::SourceUnavailable,
            Self::CsvParse { .. } | Self::DataFormat(_) => ErrorKind::DataFormat,
        }
    }
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
