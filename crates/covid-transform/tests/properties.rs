use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use covid_model::{CaseColumn, NEGATIVE_RESULT, POSITIVE_RESULT, RawCaseRecord};
use covid_transform::CaseSeriesBuilder;

fn to_records(days: &[(u16, Option<u64>, Option<u64>)]) -> Vec<RawCaseRecord> {
    let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
    let mut seen = std::collections::BTreeSet::new();
    let mut records = Vec::new();
    for (offset, positive, negative) in days {
        if !seen.insert(*offset) {
            continue;
        }
        let date = start.checked_add_days(Days::new(u64::from(*offset)));
        records.push(RawCaseRecord::new(date, POSITIVE_RESULT, *positive));
        records.push(RawCaseRecord::new(date, NEGATIVE_RESULT, *negative));
    }
    records
}

fn days_strategy() -> impl Strategy<Value = Vec<(u16, Option<u64>, Option<u64>)>> {
    prop::collection::vec(
        (
            0u16..400,
            prop::option::of(0u64..10_000),
            prop::option::of(0u64..10_000),
        ),
        0..60,
    )
}

proptest! {
    #[test]
    fn output_is_strictly_ascending(days in days_strategy()) {
        let series = CaseSeriesBuilder::new().build(&to_records(&days)).unwrap();
        for pair in series.rows().windows(2) {
            prop_assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn positive_counts_never_fall_below_floor_when_missing(days in days_strategy()) {
        let series = CaseSeriesBuilder::new().build(&to_records(&days)).unwrap();
        let mut seen = std::collections::BTreeSet::new();
        let withheld: Vec<u16> = days
            .iter()
            .filter(|(offset, _, _)| seen.insert(*offset))
            .filter(|(_, positive, _)| positive.is_none())
            .map(|(offset, _, _)| *offset)
            .collect();
        let start = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        for offset in withheld {
            let date = start.checked_add_days(Days::new(u64::from(offset))).unwrap();
            prop_assert_eq!(series.get(date).map(|row| row.positive_count), Some(5));
        }
    }

    #[test]
    fn build_is_idempotent(days in days_strategy()) {
        let records = to_records(&days);
        let builder = CaseSeriesBuilder::new();
        prop_assert_eq!(builder.build(&records).unwrap(), builder.build(&records).unwrap());
    }

    #[test]
    fn rolling_mean_matches_window_formula(days in days_strategy()) {
        let series = CaseSeriesBuilder::new().build(&to_records(&days)).unwrap();
        let positives = series.values(CaseColumn::PositiveCount);
        let averages = series.values(CaseColumn::PositiveAvg7d);
        for (i, average) in averages.iter().enumerate() {
            if i < 6 {
                prop_assert_eq!(*average, None);
            } else {
                let expected: f64 =
                    positives[i - 6..=i].iter().map(|v| v.unwrap()).sum::<f64>() / 7.0;
                let actual = average.unwrap();
                prop_assert!((actual - expected).abs() < 1e-6);
            }
        }
    }
}
