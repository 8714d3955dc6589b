//! Money-weighted return for irregularly dated cashflows.
//!
//! Sign convention: outlays (investments) are negative, inflows (redemptions
//! and the terminal valuation) are positive. Year fractions use an
//! actual/365.25 day count throughout.

use chrono::NaiveDate;

pub const DAYS_PER_YEAR: f64 = 365.25;

/// Lower edge of the bisection bracket. Just above -100%, where `xnpv` is undefined.
pub const XIRR_LOWER_BOUND: f64 = -0.9999;
pub const XIRR_UPPER_BOUND: f64 = 10.0;
const MAX_ITERATIONS: usize = 200;
const NPV_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cashflow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl Cashflow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }

    pub fn is_outlay(&self) -> bool {
        self.amount < 0.0
    }
}

/// Signed fraction of a year between two dates.
pub fn yearfrac(d0: NaiveDate, d1: NaiveDate) -> f64 {
    (d1 - d0).num_days() as f64 / DAYS_PER_YEAR
}

/// Net present value at a flat annual `rate`, with the first cashflow's date as time zero.
///
/// Returns `f64::INFINITY` for `rate <= -1.0` so that callers bracketing a root
/// can treat the invalid region as a sentinel instead of an error.
pub fn xnpv(rate: f64, cashflows: &[Cashflow]) -> f64 {
    if rate <= -1.0 {
        return f64::INFINITY;
    }
    let Some(first) = cashflows.first() else {
        return 0.0;
    };
    let t0 = first.date;
    cashflows
        .iter()
        .map(|cf| cf.amount / (1.0 + rate).powf(yearfrac(t0, cf.date)))
        .sum()
}

/// Annualized internal rate of return of dated cashflows, found by bisection
/// over `[XIRR_LOWER_BOUND, XIRR_UPPER_BOUND]`.
///
/// Returns `None` when fewer than two cashflows are given, when the flows do
/// not contain both an outlay and an inflow, or when the bracket does not
/// straddle a sign change of the NPV.
pub fn xirr(cashflows: &[Cashflow]) -> Option<f64> {
    if cashflows.len() < 2 {
        return None;
    }
    let has_outlay = cashflows.iter().any(|cf| cf.amount < 0.0);
    let has_inflow = cashflows.iter().any(|cf| cf.amount > 0.0);
    if !has_outlay || !has_inflow {
        return None;
    }

    let mut lo = XIRR_LOWER_BOUND;
    let mut hi = XIRR_UPPER_BOUND;
    let mut f_lo = xnpv(lo, cashflows);
    let f_hi = xnpv(hi, cashflows);
    if f_lo == 0.0 {
        return Some(lo);
    }
    if f_hi == 0.0 {
        return Some(hi);
    }
    if f_lo * f_hi > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (lo + hi) / 2.0;
        let f_mid = xnpv(mid, cashflows);
        if f_mid.abs() < NPV_TOLERANCE {
            return Some(mid);
        }
        if f_lo * f_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Some((lo + hi) / 2.0)
}
