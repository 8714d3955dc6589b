//! Per-calendar-year budget for opportunistic extra contributions.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct ReservePool {
    nominal: f64,
    remaining: f64,
    year: i32,
}

impl ReservePool {
    /// A full pool for the year of `first_date`.
    pub fn new(nominal: f64, first_date: NaiveDate) -> Self {
        let nominal = nominal.max(0.0);
        Self {
            nominal,
            remaining: nominal,
            year: first_date.year(),
        }
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Refill the pool when `date` falls in a different year than the last one seen.
    ///
    /// Returns `true` when a reset happened.
    pub fn observe(&mut self, date: NaiveDate) -> bool {
        if date.year() == self.year {
            return false;
        }
        self.year = date.year();
        self.remaining = self.nominal;
        true
    }

    /// Take up to `requested` from the pool and return what was granted.
    pub fn draw(&mut self, requested: f64) -> f64 {
        if !(requested > 0.0) {
            return 0.0;
        }
        let granted = requested.min(self.remaining).max(0.0);
        self.remaining -= granted;
        granted
    }
}
