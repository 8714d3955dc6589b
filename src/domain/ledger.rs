//! Cashflow and valuation bookkeeping for one simulation run.

use chrono::NaiveDate;

use super::xirr::{Cashflow, DAYS_PER_YEAR, xirr};
use super::yearly::{YearlyXirr, yearly_xirr};

/// Mark-to-market value of the holding at a day's close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// The three return metrics reported for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnMetrics {
    pub full_period_xirr: Option<f64>,
    pub trailing_xirr: Option<f64>,
    pub yearly_xirr: YearlyXirr,
}

/// Accumulates outlays and the daily valuation curve while a loop replays prices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DcaLedger {
    pub cashflows: Vec<Cashflow>,
    pub daily_values: Vec<ValuationPoint>,
    pub total_invested: f64,
}

impl DcaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(days: usize) -> Self {
        Self {
            cashflows: Vec::new(),
            daily_values: Vec::with_capacity(days),
            total_invested: 0.0,
        }
    }

    pub fn record_value(&mut self, date: NaiveDate, value: f64) {
        self.daily_values.push(ValuationPoint { date, value });
    }

    /// Replace the most recent valuation, used after a purchase on that day.
    pub fn revalue_last(&mut self, value: f64) {
        if let Some(last) = self.daily_values.last_mut() {
            last.value = value;
        }
    }

    /// Record a contribution as a negative cashflow.
    pub fn record_outlay(&mut self, date: NaiveDate, amount: f64) {
        self.total_invested += amount;
        self.cashflows.push(Cashflow::new(date, -amount));
    }

    /// Close the books at `end` with the terminal valuation and solve every metric.
    pub fn returns(&self, end: NaiveDate, final_value: f64, trailing_years: u32) -> ReturnMetrics {
        let terminal = Cashflow::new(end, final_value);

        let mut all = self.cashflows.clone();
        all.push(terminal);
        let full_period_xirr = xirr(&all);

        let start = trailing_window_start(end, trailing_years);
        let mut trailing: Vec<Cashflow> = self
            .cashflows
            .iter()
            .filter(|cf| cf.date >= start)
            .copied()
            .collect();
        trailing.push(terminal);
        let trailing_xirr = xirr(&trailing);

        ReturnMetrics {
            full_period_xirr,
            trailing_xirr,
            yearly_xirr: yearly_xirr(&self.cashflows, &self.daily_values),
        }
    }
}

/// `end` minus `years * 365.25` days, truncated to whole days. A window
/// reaching past the earliest representable date covers every cashflow.
pub fn trailing_window_start(end: NaiveDate, years: u32) -> NaiveDate {
    let days = (f64::from(years) * DAYS_PER_YEAR) as i64;
    chrono::Duration::try_days(days)
        .and_then(|span| end.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn new_ledger_is_empty() {
        let ledger = DcaLedger::new();
        assert!(ledger.cashflows.is_empty());
        assert!(ledger.daily_values.is_empty());
        assert_eq!(ledger.total_invested, 0.0);
    }

    #[test]
    fn record_outlay_is_negative_and_summed() {
        let mut ledger = DcaLedger::new();
        ledger.record_outlay(d(2024, 1, 10), 100.0);
        ledger.record_outlay(d(2024, 2, 12), 250.0);
        assert_eq!(ledger.total_invested, 350.0);
        assert_eq!(ledger.cashflows[0].amount, -100.0);
        assert_eq!(ledger.cashflows[1].amount, -250.0);
        let abs_sum: f64 = ledger
            .cashflows
            .iter()
            .filter(|cf| cf.is_outlay())
            .map(|cf| cf.amount.abs())
            .sum();
        assert_eq!(abs_sum, ledger.total_invested);
    }

    #[test]
    fn revalue_last_updates_in_place() {
        let mut ledger = DcaLedger::new();
        ledger.record_value(d(2024, 1, 9), 0.0);
        ledger.record_value(d(2024, 1, 10), 0.0);
        ledger.revalue_last(100.0);
        assert_eq!(ledger.daily_values.len(), 2);
        assert_eq!(ledger.daily_values[0].value, 0.0);
        assert_eq!(ledger.daily_values[1].value, 100.0);
    }

    #[test]
    fn revalue_last_on_empty_is_noop() {
        let mut ledger = DcaLedger::new();
        ledger.revalue_last(5.0);
        assert!(ledger.daily_values.is_empty());
    }

    #[test]
    fn trailing_window_truncates_fractional_days() {
        // 3 * 365.25 = 1095.75 -> 1095 days
        assert_eq!(trailing_window_start(d(2024, 1, 1), 3), d(2024, 1, 1) - chrono::Duration::days(1095));
        // 1 * 365.25 -> 365 days, one day short of a calendar year across a leap day
        assert_eq!(trailing_window_start(d(2024, 3, 1), 1), d(2023, 3, 2));
    }

    #[test]
    fn trailing_window_past_earliest_date_saturates() {
        assert_eq!(trailing_window_start(d(2024, 1, 1), 1_000_000), NaiveDate::MIN);
        assert_eq!(trailing_window_start(d(2024, 1, 1), u32::MAX), NaiveDate::MIN);
    }

    #[test]
    fn oversized_trailing_window_matches_full_period() {
        let mut ledger = DcaLedger::new();
        ledger.record_outlay(d(2020, 1, 10), 1000.0);
        ledger.record_outlay(d(2021, 1, 11), 1000.0);
        ledger.record_value(d(2022, 1, 10), 2300.0);
        let metrics = ledger.returns(d(2022, 1, 10), 2300.0, u32::MAX);
        assert!(metrics.full_period_xirr.is_some());
        assert_eq!(metrics.trailing_xirr, metrics.full_period_xirr);
    }

    #[test]
    fn returns_without_outlays_are_not_applicable() {
        let mut ledger = DcaLedger::new();
        ledger.record_value(d(2024, 1, 2), 0.0);
        let metrics = ledger.returns(d(2024, 1, 2), 0.0, 3);
        assert_eq!(metrics.full_period_xirr, None);
        assert_eq!(metrics.trailing_xirr, None);
        assert_eq!(metrics.yearly_xirr.get(&2024), Some(&None));
    }

    #[test]
    fn trailing_excludes_old_outlays() {
        let mut ledger = DcaLedger::new();
        ledger.record_outlay(d(2015, 1, 10), 1000.0);
        ledger.record_outlay(d(2023, 1, 10), 1000.0);
        ledger.record_value(d(2015, 1, 10), 1000.0);
        ledger.record_value(d(2024, 1, 10), 2500.0);

        let metrics = ledger.returns(d(2024, 1, 10), 2500.0, 3);
        let full = metrics.full_period_xirr.unwrap();
        let trailing = metrics.trailing_xirr.unwrap();
        // Trailing view sees 1000 turning into 2500 within a year.
        assert!(trailing > 1.0);
        assert!(full < trailing);
    }
}
