//! Tests for daily series queries and decoding.

use chrono::NaiveDate;

use covid_model::{
    CaseColumn, CaseDay, CaseSeries, DataFormatError, HospColumn, HospDay, HospSeries,
};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() + chrono::Duration::days(offset)
}

fn case_day(offset: i64, positive: u64, avg: Option<f64>) -> CaseDay {
    CaseDay {
        date: day(offset),
        positive_count: positive,
        negative_count: None,
        percent_positive: None,
        positive_avg_7d: avg,
        percent_positive_avg_7d: None,
        ten_days_prior: None,
        ten_day_difference: None,
        ten_day_percent_change: None,
    }
}

fn hosp_day(offset: i64, count: u64, avg: Option<f64>) -> HospDay {
    HospDay {
        date: day(offset),
        hospitalized_count: count,
        not_hospitalized_count: Some(100),
        hospitalized_avg_7d: avg,
    }
}

#[test]
fn max_in_last_ignores_undefined_entries() {
    let series = CaseSeries::new(vec![
        case_day(0, 40, Some(90.0)),
        case_day(1, 10, Some(12.0)),
        case_day(2, 30, None),
        case_day(3, 20, Some(15.5)),
    ]);

    assert_eq!(series.max_in_last(CaseColumn::PositiveAvg7d, 3), Some(15.5));
    assert_eq!(series.max_in_last(CaseColumn::PositiveAvg7d, 10), Some(90.0));
    assert_eq!(series.max_in_last(CaseColumn::PositiveCount, 2), Some(30.0));
}

#[test]
fn max_in_last_is_none_when_window_is_all_undefined() {
    let series = CaseSeries::new(vec![
        case_day(0, 40, Some(90.0)),
        case_day(1, 10, None),
        case_day(2, 30, None),
    ]);

    assert_eq!(series.max_in_last(CaseColumn::PositiveAvg7d, 2), None);
    assert_eq!(series.max_in_last(CaseColumn::TenDayPercentChange, 3), None);
    assert_eq!(series.max_in_last(CaseColumn::PositiveAvg7d, 0), None);
}

#[test]
fn max_in_last_on_empty_series() {
    let series = HospSeries::default();
    assert!(series.is_empty());
    assert_eq!(series.max_in_last(HospColumn::HospitalizedAvg7d, 30), None);
}

#[test]
fn tail_returns_trailing_rows() {
    let series = HospSeries::new((0..5).map(|i| hosp_day(i, 10 + i as u64, None)).collect());

    let tail = series.tail(2);
    assert_eq!(tail.len(), 2);
    assert_eq!(tail[0].date, day(3));
    assert_eq!(tail[1].date, day(4));
    assert_eq!(series.tail(50).len(), 5);
    assert!(series.tail(0).is_empty());
}

#[test]
fn get_finds_rows_by_date() {
    let series = HospSeries::new(vec![hosp_day(0, 5, None), hosp_day(3, 9, Some(7.0))]);

    assert_eq!(series.get(day(3)).map(|row| row.hospitalized_count), Some(9));
    assert!(series.get(day(1)).is_none());
    assert_eq!(series.latest().map(|row| row.date), Some(day(3)));
}

#[test]
fn values_keep_undefined_distinct_from_zero() {
    let series = HospSeries::new(vec![hosp_day(0, 0, None), hosp_day(1, 0, Some(0.0))]);

    assert_eq!(
        series.values(HospColumn::HospitalizedAvg7d),
        vec![None, Some(0.0)]
    );
    assert_eq!(
        series.values(HospColumn::HospitalizedCount),
        vec![Some(0.0), Some(0.0)]
    );
}

#[test]
fn series_serializes_as_a_list_of_rows() {
    let series = HospSeries::new(vec![hosp_day(0, 5, None)]);
    let json = serde_json::to_value(&series).expect("serialize series");

    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["date"], "2022-01-01");
    assert_eq!(rows[0]["hospitalized_count"], 5);
    assert!(rows[0]["hospitalized_avg_7d"].is_null());
}

#[test]
fn deserialized_series_supports_date_lookup() {
    let json = r#"[
        {"date": "2022-01-01", "hospitalized_count": 5, "not_hospitalized_count": 90, "hospitalized_avg_7d": null},
        {"date": "2022-01-02", "hospitalized_count": 12, "not_hospitalized_count": 88, "hospitalized_avg_7d": null}
    ]"#;

    let series: HospSeries = serde_json::from_str(json).expect("ordered rows");

    assert_eq!(series.len(), 2);
    assert_eq!(series.get(day(1)).map(|row| row.hospitalized_count), Some(12));
}

#[test]
fn deserializing_out_of_order_rows_fails() {
    let json = r#"[
        {"date": "2022-01-03", "hospitalized_count": 7, "not_hospitalized_count": null, "hospitalized_avg_7d": null},
        {"date": "2022-01-01", "hospitalized_count": 9, "not_hospitalized_count": null, "hospitalized_avg_7d": null}
    ]"#;

    let error = serde_json::from_str::<HospSeries>(json).unwrap_err();
    assert!(error.to_string().contains("2022-01-01 does not follow 2022-01-03"));
}

#[test]
fn repeated_dates_are_rejected() {
    let rows = vec![hosp_day(0, 6, None), hosp_day(0, 8, None)];

    assert_eq!(
        HospSeries::try_from_rows(rows),
        Err(DataFormatError::UnorderedDates {
            previous: day(0),
            date: day(0),
        })
    );
}
