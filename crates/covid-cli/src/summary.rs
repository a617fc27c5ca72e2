//! Dashboard metrics and their terminal rendering.

use chrono::NaiveDate;
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use covid_model::{
    BandScale, CASE_BANDS, CaseColumn, CaseDay, CaseSeries, DailySeries, DayRow,
    HOSPITALIZATION_BANDS, HospColumn, HospDay, HospSeries, PERCENT_POSITIVE_BANDS, Severity,
};

/// Latest reading of one dashboard chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary {
    pub title: &'static str,
    pub date: Option<NaiveDate>,
    pub latest: Option<f64>,
    /// Highest defined value in the trailing window; sizes the chart axis.
    pub peak: Option<f64>,
    pub severity: Option<Severity>,
    /// Number of trailing rows the peak is taken over. Dates missing from
    /// the source are not rows, so this can span more calendar days.
    pub window: usize,
}

impl MetricSummary {
    fn from_series<R: DayRow>(
        title: &'static str,
        series: &DailySeries<R>,
        column: R::Column,
        scale: &BandScale,
        window: usize,
    ) -> Self {
        let latest_row = series.latest();
        let latest = latest_row.and_then(|row| row.value(column));
        Self {
            title,
            date: latest_row.map(R::date),
            latest,
            peak: series.max_in_last(column, window),
            severity: scale.classify(latest),
            window,
        }
    }

    /// One-line form used in logs and plain output.
    pub fn line(&self) -> String {
        let date = self
            .date
            .map_or_else(|| "-".to_string(), |date| date.to_string());
        let band = self.severity.map_or("-", Severity::label);
        format!(
            "{}: {} on {date} (peak {} in last {} rows, band {band})",
            self.title,
            format_value(self.latest),
            format_value(self.peak),
            self.window,
        )
    }
}

/// The three dashboard charts: positive tests, percent positivity, and
/// hospitalizations, each as a seven-day average.
pub fn summarize(
    cases: &CaseSeries,
    hospitalizations: &HospSeries,
    window: usize,
) -> Vec<MetricSummary> {
    vec![
        MetricSummary::from_series(
            "Positive tests (7d avg)",
            cases,
            CaseColumn::PositiveAvg7d,
            &CASE_BANDS,
            window,
        ),
        MetricSummary::from_series(
            "Percent positive (7d avg)",
            cases,
            CaseColumn::PercentPositiveAvg7d,
            &PERCENT_POSITIVE_BANDS,
            window,
        ),
        MetricSummary::from_series(
            "Hospitalizations (7d avg)",
            hospitalizations,
            HospColumn::HospitalizedAvg7d,
            &HOSPITALIZATION_BANDS,
            window,
        ),
    ]
}

/// Two decimals, or `-` for an undefined value.
pub fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.2}"))
}

fn format_count(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| value.to_string())
}

pub fn summary_table(metrics: &[MetricSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Date"),
        header_cell("Latest"),
        header_cell("Peak"),
        header_cell("Band"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for metric in metrics {
        table.add_row(vec![
            Cell::new(metric.title).add_attribute(Attribute::Bold),
            date_cell(metric.date),
            value_cell(metric.latest),
            value_cell(metric.peak),
            severity_cell(metric.severity),
        ]);
    }
    table
}

pub fn case_table(rows: &[CaseDay]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Date")];
    header.extend(CaseColumn::ALL.iter().map(|column| header_cell(column.label())));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=CaseColumn::ALL.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in rows {
        table.add_row(vec![
            Cell::new(row.date),
            Cell::new(row.positive_count),
            count_cell(row.negative_count),
            value_cell(row.percent_positive),
            banded_cell(row.positive_avg_7d, &CASE_BANDS),
            banded_cell(row.percent_positive_avg_7d, &PERCENT_POSITIVE_BANDS),
            value_cell(row.ten_days_prior),
            value_cell(row.ten_day_difference),
            value_cell(row.ten_day_percent_change),
        ]);
    }
    table
}

pub fn hospitalization_table(rows: &[HospDay]) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Date")];
    header.extend(HospColumn::ALL.iter().map(|column| header_cell(column.label())));
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..=HospColumn::ALL.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in rows {
        table.add_row(vec![
            Cell::new(row.date),
            Cell::new(row.hospitalized_count),
            count_cell(row.not_hospitalized_count),
            banded_cell(row.hospitalized_avg_7d, &HOSPITALIZATION_BANDS),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Green => Color::Green,
        Severity::Yellow => Color::Yellow,
        Severity::Orange => Color::DarkYellow,
        Severity::Red => Color::Red,
    }
}

fn severity_cell(severity: Option<Severity>) -> Cell {
    match severity {
        Some(severity) => Cell::new(severity.label())
            .fg(severity_color(severity))
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn banded_cell(value: Option<f64>, scale: &BandScale) -> Cell {
    match (value, scale.classify(value)) {
        (Some(_), Some(severity)) => Cell::new(format_value(value)).fg(severity_color(severity)),
        _ => value_cell(value),
    }
}

fn value_cell(value: Option<f64>) -> Cell {
    match value {
        Some(_) => Cell::new(format_value(value)),
        None => dim_cell("-"),
    }
}

fn count_cell(value: Option<u64>) -> Cell {
    match value {
        Some(_) => Cell::new(format_count(value)),
        None => dim_cell("-"),
    }
}

fn date_cell(date: Option<NaiveDate>) -> Cell {
    match date {
        Some(date) => Cell::new(date),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 12, day).unwrap()
    }

    fn case_day(day: u32, avg: Option<f64>, pct: Option<f64>) -> CaseDay {
        CaseDay {
            date: date(day),
            positive_count: 100,
            negative_count: Some(900),
            percent_positive: Some(10.0),
            positive_avg_7d: avg,
            percent_positive_avg_7d: pct,
            ten_days_prior: None,
            ten_day_difference: None,
            ten_day_percent_change: None,
        }
    }

    fn hosp_day(day: u32, avg: Option<f64>) -> HospDay {
        HospDay {
            date: date(day),
            hospitalized_count: 40,
            not_hospitalized_count: None,
            hospitalized_avg_7d: avg,
        }
    }

    #[test]
    fn summarizes_latest_peak_and_band() {
        let cases = CaseSeries::new(vec![
            case_day(1, Some(600.0), Some(3.0)),
            case_day(2, Some(180.0), None),
        ]);
        let hospitalizations = HospSeries::new(vec![hosp_day(2, Some(250.0))]);

        let metrics = summarize(&cases, &hospitalizations, 30);

        assert_eq!(metrics[0].latest, Some(180.0));
        assert_eq!(metrics[0].peak, Some(600.0));
        assert_eq!(metrics[0].severity, Some(Severity::Yellow));
        assert_eq!(metrics[1].latest, None);
        assert_eq!(metrics[1].peak, Some(3.0));
        assert_eq!(metrics[1].severity, None);
        assert_eq!(metrics[2].severity, Some(Severity::Orange));
    }

    #[test]
    fn peak_respects_the_window() {
        let cases = CaseSeries::new(vec![
            case_day(1, Some(600.0), None),
            case_day(2, Some(90.0), None),
        ]);
        let metrics = summarize(&cases, &HospSeries::default(), 1);

        assert_eq!(metrics[0].peak, Some(90.0));
        assert_eq!(metrics[2].date, None);
    }

    #[test]
    fn window_counts_rows_across_date_gaps() {
        let cases = CaseSeries::new(vec![
            case_day(1, Some(700.0), None),
            case_day(2, Some(80.0), None),
            case_day(20, Some(60.0), None),
        ]);
        let metrics = summarize(&cases, &HospSeries::default(), 2);

        assert_eq!(metrics[0].peak, Some(80.0));
        assert_eq!(
            metrics[0].line(),
            "Positive tests (7d avg): 60.00 on 2021-12-20 (peak 80.00 in last 2 rows, band Green)"
        );
    }

    #[test]
    fn summary_lines() {
        let cases = CaseSeries::new(vec![case_day(3, Some(412.5), Some(7.25))]);
        let hospitalizations = HospSeries::new(vec![hosp_day(3, None)]);
        let lines: Vec<String> = summarize(&cases, &hospitalizations, 30)
            .iter()
            .map(MetricSummary::line)
            .collect();

        insta::assert_snapshot!(lines.join("\n"), @r"
        Positive tests (7d avg): 412.50 on 2021-12-03 (peak 412.50 in last 30 rows, band Orange)
        Percent positive (7d avg): 7.25 on 2021-12-03 (peak 7.25 in last 30 rows, band Orange)
        Hospitalizations (7d avg): - on 2021-12-03 (peak - in last 30 rows, band -)
        ");
    }

    #[test]
    fn undefined_values_render_as_dash() {
        assert_eq!(format_value(None), "-");
        assert_eq!(format_value(Some(0.0)), "0.00");
        assert_eq!(format_count(None), "-");
    }

    #[test]
    fn tables_have_one_row_per_day() {
        let rows = vec![case_day(1, None, None), case_day(2, Some(1.0), None)];
        assert_eq!(case_table(&rows).row_count(), 2);
        assert_eq!(hospitalization_table(&[hosp_day(1, None)]).row_count(), 1);
    }
}
