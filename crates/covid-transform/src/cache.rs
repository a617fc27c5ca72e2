//! Once-per-day memoization of built series.
//!
//! A [`DailyCache`] holds at most one value, tagged with the day it was
//! computed. The first request on a new day recomputes; later requests that
//! day reuse the stored value. A failed recompute leaves the previous entry
//! in place and is retried on the next request.

use std::cell::Cell;

use chrono::{Local, NaiveDate};
use tracing::debug;

/// Source of "today" for cache keys.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Settable clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Cell::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

#[derive(Debug, Clone)]
pub struct DailyCache<T> {
    name: &'static str,
    entry: Option<(NaiveDate, T)>,
}

impl<T> DailyCache<T> {
    pub fn new(name: &'static str) -> Self {
        Self { name, entry: None }
    }

    /// Return today's value, computing it with `compute` on the first call of
    /// the day.
    pub fn get_or_try_insert_with<C, F, E>(&mut self, clock: &C, compute: F) -> Result<&T, E>
    where
        C: Clock + ?Sized,
        F: FnOnce() -> Result<T, E>,
    {
        let today = clock.today();
        match self.entry.take() {
            Some((date, value)) if date == today => {
                debug!(cache = self.name, %date, "daily cache hit");
                Ok(&self.entry.insert((date, value)).1)
            }
            previous => {
                debug!(cache = self.name, %today, "daily cache miss");
                match compute() {
                    Ok(value) => Ok(&self.entry.insert((today, value)).1),
                    Err(error) => {
                        self.entry = previous;
                        Err(error)
                    }
                }
            }
        }
    }
}
