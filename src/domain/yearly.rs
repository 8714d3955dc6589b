//! Calendar-year breakdown of a money-weighted return.
//!
//! Each year is treated as its own sub-problem: the holding's value on the
//! year's first trading day is bought in, the value on its last trading day is
//! sold out, and the genuine cashflows in between are kept as-is.

use chrono::Datelike;
use std::collections::BTreeMap;

use super::ledger::ValuationPoint;
use super::xirr::{Cashflow, xirr};

/// Per-year XIRR, keyed by calendar year in ascending order.
pub type YearlyXirr = BTreeMap<i32, Option<f64>>;

pub fn yearly_xirr(cashflows: &[Cashflow], daily_values: &[ValuationPoint]) -> YearlyXirr {
    let mut values_by_year: BTreeMap<i32, Vec<&ValuationPoint>> = BTreeMap::new();
    for point in daily_values {
        values_by_year.entry(point.date.year()).or_default().push(point);
    }

    let mut cashflows_by_year: BTreeMap<i32, Vec<Cashflow>> = BTreeMap::new();
    for cf in cashflows {
        cashflows_by_year.entry(cf.date.year()).or_default().push(*cf);
    }

    let mut results = YearlyXirr::new();
    for (year, values) in &values_by_year {
        let (Some(start), Some(end)) = (values.first(), values.last()) else {
            continue;
        };

        let in_year: Vec<Cashflow> = cashflows_by_year
            .get(year)
            .map(|cfs| {
                cfs.iter()
                    .filter(|cf| cf.date >= start.date && cf.date <= end.date)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        if start.value == 0.0 && end.value == 0.0 && in_year.is_empty() {
            results.insert(*year, None);
            continue;
        }

        let mut year_cfs = Vec::with_capacity(in_year.len() + 2);
        year_cfs.push(Cashflow::new(start.date, -start.value));
        year_cfs.extend(in_year);
        year_cfs.push(Cashflow::new(end.date, end.value));
        results.insert(*year, xirr(&year_cfs));
    }

    results
}
