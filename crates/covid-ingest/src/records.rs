//! Conversion from CSV tables to raw long-format records.

use chrono::NaiveDate;
use tracing::debug;

use covid_model::{DataFormatError, RawCaseRecord, RawHospitalizationRecord};

use crate::csv_table::CsvTable;
use crate::values::{parse_count, parse_source_date};

/// Required columns of the cases-by-date source.
pub const CASE_COLUMNS: [&str; 3] = ["collection_date", "test_result", "count"];

/// Required columns of the hospitalizations-by-date source.
pub const HOSPITALIZATION_COLUMNS: [&str; 3] = ["date", "hospitalized", "count"];

/// Parse a cases-by-date table. Other columns are ignored.
pub fn parse_case_records(table: &CsvTable) -> Result<Vec<RawCaseRecord>, DataFormatError> {
    parse_long_records(table, CASE_COLUMNS, RawCaseRecord::new)
}

/// Parse a hospitalizations-by-date table. Other columns are ignored.
pub fn parse_hospitalization_records(
    table: &CsvTable,
) -> Result<Vec<RawHospitalizationRecord>, DataFormatError> {
    parse_long_records(table, HOSPITALIZATION_COLUMNS, RawHospitalizationRecord::new)
}

fn parse_long_records<T>(
    table: &CsvTable,
    [date_column, category_column, count_column]: [&str; 3],
    build: impl Fn(Option<NaiveDate>, String, Option<u64>) -> T,
) -> Result<Vec<T>, DataFormatError> {
    let date_idx = table.column_index(date_column)?;
    let category_idx = table.column_index(category_column)?;
    let count_idx = table.column_index(count_column)?;

    let mut records = Vec::with_capacity(table.row_count());
    let mut null_dates = 0usize;
    for (row_idx, row) in table.rows.iter().enumerate() {
        let date = parse_source_date(&row[date_idx]);
        if date.is_none() {
            null_dates += 1;
            continue;
        }
        let raw_count = row[count_idx].as_str();
        let count = if raw_count.is_empty() {
            None
        } else {
            let parsed = parse_count(raw_count).ok_or_else(|| DataFormatError::InvalidCount {
                value: raw_count.to_string(),
                line: table.line(row_idx),
                source_name: table.source_name.clone(),
            })?;
            Some(parsed)
        };
        records.push(build(date, row[category_idx].clone(), count));
    }
    debug!(
        source = %table.source_name,
        records = records.len(),
        null_dates,
        "parsed long-format records"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_table::read_csv_table;

    #[test]
    fn parses_case_rows_and_ignores_extra_columns() {
        let text = "the_geom,collection_date,test_result,count,etl_timestamp\n\
                    ,2020-03-10T00:00:00Z,positive,12,2022-01-01\n\
                    ,2020-03-10T00:00:00Z,negative,88,2022-01-01\n";
        let table = read_csv_table(text, "cases.csv").expect("read csv");
        let records = parse_case_records(&table).expect("parse records");

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            RawCaseRecord::new(NaiveDate::from_ymd_opt(2020, 3, 10), "positive", Some(12))
        );
        assert_eq!(records[1].count, Some(88));
    }

    #[test]
    fn skips_null_dates_and_keeps_empty_counts_as_none() {
        let text = "date,hospitalized,count\n,Yes,4\n2021-01-02,Yes,\n";
        let table = read_csv_table(text, "hosp.csv").expect("read csv");
        let records = parse_hospitalization_records(&table).expect("parse records");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2021, 1, 2));
        assert_eq!(records[0].count, None);
    }

    #[test]
    fn bad_count_on_a_null_date_row_is_ignored() {
        let text = "collection_date,test_result,count\n\
                    2021-01-01,positive,12\n\
                    ,positive,n/a\n";
        let table = read_csv_table(text, "cases.csv").expect("read csv");
        let records = parse_case_records(&table).expect("parse records");

        assert_eq!(
            records,
            vec![RawCaseRecord::new(NaiveDate::from_ymd_opt(2021, 1, 1), "positive", Some(12))]
        );
    }

    #[test]
    fn invalid_count_reports_line() {
        let text = "date,hospitalized,count\n2021-01-01,Yes,3\n2021-01-02,Yes,lots\n";
        let table = read_csv_table(text, "hosp.csv").expect("read csv");
        let error = parse_hospitalization_records(&table).unwrap_err();

        assert_eq!(
            error,
            DataFormatError::InvalidCount {
                value: "lots".to_string(),
                line: 3,
                source_name: "hosp.csv".to_string(),
            }
        );
    }

    #[test]
    fn missing_column_is_a_format_error() {
        let table = read_csv_table("collection_date,count\n2021-01-01,3\n", "cases.csv")
            .expect("read csv");
        let error = parse_case_records(&table).unwrap_err();

        assert_eq!(
            error,
            DataFormatError::MissingColumn {
                column: "test_result".to_string(),
                source_name: "cases.csv".to_string(),
            }
        );
    }
}
