use csv::ReaderBuilder;
use tracing::debug;

use covid_model::DataFormatError;

use crate::error::{IngestError, Result};

/// A CSV body held as trimmed strings, header first.
#[derive(Debug, Clone)]
pub struct CsvTable {
    /// Where the table came from, used in error messages.
    pub source_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// 1-based source line of each entry in `rows`.
    pub lines: Vec<u64>,
}

impl CsvTable {
    /// Index of `name` in the header, compared case-insensitively.
    pub fn column_index(&self, name: &str) -> std::result::Result<usize, DataFormatError> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .ok_or_else(|| DataFormatError::MissingColumn {
                column: name.to_string(),
                source_name: self.source_name.clone(),
            })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn line(&self, row_idx: usize) -> u64 {
        self.lines.get(row_idx).copied().unwrap_or_default()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Parse a CSV body. The first non-blank row is the header; blank rows are
/// skipped and short rows are padded to the header width.
pub fn read_csv_table(text: &str, source_name: &str) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut lines = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| IngestError::CsvParse {
            source_name: source_name.to_string(),
            message: error.to_string(),
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(header) = headers.as_ref() else {
            headers = Some(record.iter().map(normalize_header).collect());
            continue;
        };
        let mut row = Vec::with_capacity(header.len());
        for idx in 0..header.len() {
            row.push(normalize_cell(record.get(idx).unwrap_or("")));
        }
        rows.push(row);
        lines.push(record.position().map_or(0, csv::Position::line));
    }
    let table = CsvTable {
        source_name: source_name.to_string(),
        headers: headers.unwrap_or_default(),
        rows,
        lines,
    };
    debug!(
        source = %table.source_name,
        columns = table.headers.len(),
        rows = table.row_count(),
        "read csv table"
    );
    Ok(table)
}
