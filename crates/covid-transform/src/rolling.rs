//! Row-indexed window arithmetic over optional values.
//!
//! Windows are counted in rows, not calendar days: a gap in the dates makes
//! a window span more than its length in wall-clock time. Any undefined
//! value inside a window makes the result for that row undefined.

/// Trailing arithmetic mean of the last `window` values ending at each row.
///
/// The first `window - 1` rows are undefined.
pub fn trailing_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|idx| {
            if idx + 1 < window {
                return None;
            }
            let slice = &values[idx + 1 - window..=idx];
            let sum = slice
                .iter()
                .copied()
                .try_fold(0.0, |acc, value| value.map(|v| acc + v))?;
            Some(sum / window as f64)
        })
        .collect()
}

/// The value `lag` rows earlier; undefined for the first `lag` rows.
pub fn lagged(values: &[Option<f64>], lag: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|idx| idx.checked_sub(lag).and_then(|prior| values[prior]))
        .collect()
}

/// `current - prior`, undefined if either side is.
pub fn difference(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    Some(current? - prior?)
}

/// `100 * (current - prior) / prior`, undefined for an undefined or zero prior.
pub fn percent_change(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    let prior = prior.filter(|value| *value != 0.0)?;
    Some(100.0 * difference(current, Some(prior))? / prior)
}

/// `100 * part / (part + rest)`, undefined when `rest` is missing or the
/// total is zero.
pub fn percent_of_total(part: u64, rest: Option<u64>) -> Option<f64> {
    let total = part.checked_add(rest?)?;
    if total == 0 {
        return None;
    }
    Some(100.0 * part as f64 / total as f64)
}
