//! Monthly investment-date selection.

use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashSet};

use super::error::DcaError;

pub const MIN_INVEST_DAY: u32 = 1;
/// Capped at 28 so every month can contain the target day.
pub const MAX_INVEST_DAY: u32 = 28;

pub fn validate_invest_day(invest_day: u32) -> Result<(), DcaError> {
    if (MIN_INVEST_DAY..=MAX_INVEST_DAY).contains(&invest_day) {
        Ok(())
    } else {
        Err(DcaError::InvalidInvestDay(invest_day))
    }
}

/// One investment date per (year, month) present in `trading_dates`.
///
/// Picks the first trading date on or after `invest_day`, falling back to the
/// month's last trading date when none reaches it.
pub fn monthly_invest_dates(
    trading_dates: &[NaiveDate],
    invest_day: u32,
) -> Result<Vec<NaiveDate>, DcaError> {
    validate_invest_day(invest_day)?;

    let mut by_month: BTreeMap<(i32, u32), Vec<NaiveDate>> = BTreeMap::new();
    for &date in trading_dates {
        by_month
            .entry((date.year(), date.month()))
            .or_default()
            .push(date);
    }

    Ok(by_month
        .values()
        .filter_map(|days| {
            days.iter()
                .copied()
                .find(|d| d.day() >= invest_day)
                .or_else(|| days.last().copied())
        })
        .collect())
}

/// Set form of [`monthly_invest_dates`] for membership tests inside a loop.
pub fn invest_date_set(
    trading_dates: &[NaiveDate],
    invest_day: u32,
) -> Result<HashSet<NaiveDate>, DcaError> {
    Ok(monthly_invest_dates(trading_dates, invest_day)?
        .into_iter()
        .collect())
}
