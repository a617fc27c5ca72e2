//! Tabular views of built series for export.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use covid_model::{CaseColumn, CaseSeries, DailySeries, DayRow, HospColumn, HospSeries};

const DATE_COLUMN: &str = "date";

fn date_column<R: DayRow>(series: &DailySeries<R>) -> Column {
    let dates: Vec<String> = series
        .iter()
        .map(|row| row.date().format("%Y-%m-%d").to_string())
        .collect();
    Column::new(DATE_COLUMN.into(), dates)
}

/// One row per date; counts as integers, derived fields as nullable floats.
pub fn case_frame(series: &CaseSeries) -> PolarsResult<DataFrame> {
    let mut columns = vec![date_column(series)];
    let positives: Vec<u64> = series.iter().map(|row| row.positive_count).collect();
    let negatives: Vec<Option<u64>> = series.iter().map(|row| row.negative_count).collect();
    columns.push(Column::new(CaseColumn::PositiveCount.name().into(), positives));
    columns.push(Column::new(CaseColumn::NegativeCount.name().into(), negatives));
    for column in CaseColumn::ALL
        .into_iter()
        .filter(|column| !matches!(column, CaseColumn::PositiveCount | CaseColumn::NegativeCount))
    {
        columns.push(Column::new(column.name().into(), series.values(column)));
    }
    DataFrame::new(columns)
}

pub fn hospitalization_frame(series: &HospSeries) -> PolarsResult<DataFrame> {
    let hospitalized: Vec<u64> = series.iter().map(|row| row.hospitalized_count).collect();
    let not_hospitalized: Vec<Option<u64>> =
        series.iter().map(|row| row.not_hospitalized_count).collect();
    DataFrame::new(vec![
        date_column(series),
        Column::new(HospColumn::HospitalizedCount.name().into(), hospitalized),
        Column::new(
            HospColumn::NotHospitalizedCount.name().into(),
            not_hospitalized,
        ),
        Column::new(
            HospColumn::HospitalizedAvg7d.name().into(),
            series.values(HospColumn::HospitalizedAvg7d),
        ),
    ])
}

/// Write `df` as CSV with a header row. Undefined values become empty cells.
pub fn write_frame_csv(df: &mut DataFrame, path: &Path) -> PolarsResult<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    info!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}
