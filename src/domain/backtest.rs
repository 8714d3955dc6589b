//! Single-asset monthly DCA simulation and the shared result record.

use chrono::NaiveDate;
use log::{debug, warn};

use super::error::DcaError;
use super::ledger::{DcaLedger, ReturnMetrics};
use super::price::{PricePoint, split_series};
use super::schedule::{invest_date_set, validate_invest_day};
use super::sizing::ma250_ratio_series;
use super::strategy::StrategyKey;
use super::yearly::YearlyXirr;

pub const DEFAULT_INVEST_DAY: u32 = 10;
pub const DEFAULT_TRAILING_YEARS: u32 = 3;
pub const MAX_TRAILING_YEARS: u32 = 100;

/// When to invest and how far back the trailing metric looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DcaSchedule {
    pub invest_day: u32,
    pub trailing_years: u32,
}

impl Default for DcaSchedule {
    fn default() -> Self {
        DcaSchedule {
            invest_day: DEFAULT_INVEST_DAY,
            trailing_years: DEFAULT_TRAILING_YEARS,
        }
    }
}

impl DcaSchedule {
    pub fn validate(&self) -> Result<(), DcaError> {
        validate_invest_day(self.invest_day)?;
        if !(1..=MAX_TRAILING_YEARS).contains(&self.trailing_years) {
            return Err(DcaError::InvalidTrailingYears(self.trailing_years));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub symbol: String,
    pub strategy_key: StrategyKey,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_invested: f64,
    pub final_value: f64,
    pub shares: f64,
    pub yearly_xirr: YearlyXirr,
    pub trailing_years: u32,
    pub trailing_xirr: Option<f64>,
    pub full_period_xirr: Option<f64>,
}

impl BacktestResult {
    /// Final value over capital invested; 0.0 when nothing was invested.
    pub fn multiple(&self) -> f64 {
        if self.total_invested > 0.0 {
            self.final_value / self.total_invested
        } else {
            0.0
        }
    }

    pub fn total_return(&self) -> f64 {
        if self.total_invested > 0.0 {
            self.multiple() - 1.0
        } else {
            0.0
        }
    }

    pub(crate) fn assemble(
        symbol: String,
        strategy_key: StrategyKey,
        period: (NaiveDate, NaiveDate),
        ledger: &DcaLedger,
        final_value: f64,
        shares: f64,
        trailing_years: u32,
    ) -> Self {
        let (start, end) = period;
        let ReturnMetrics {
            full_period_xirr,
            trailing_xirr,
            yearly_xirr,
        } = ledger.returns(end, final_value, trailing_years);

        debug!(
            "{} [{}] {} -> {}: invested {:.2}, final {:.2}, {} outlays",
            symbol,
            strategy_key,
            start,
            end,
            ledger.total_invested,
            final_value,
            ledger.cashflows.len()
        );

        BacktestResult {
            symbol,
            strategy_key,
            start,
            end,
            total_invested: ledger.total_invested,
            final_value,
            shares,
            yearly_xirr,
            trailing_years,
            trailing_xirr,
            full_period_xirr,
        }
    }
}

/// Replay `closes` day by day, investing `base_amount * ratio_for_index(i)` on
/// each scheduled day.
///
/// Purchases on days with a non-positive close are skipped without recording a
/// cashflow.
pub fn backtest_monthly_dca<F>(
    symbol: &str,
    strategy_key: StrategyKey,
    dates: &[NaiveDate],
    closes: &[f64],
    mut ratio_for_index: F,
    base_amount: f64,
    schedule: &DcaSchedule,
) -> Result<BacktestResult, DcaError>
where
    F: FnMut(usize) -> f64,
{
    if dates.len() != closes.len() {
        return Err(DcaError::SeriesLengthMismatch {
            reason: format!("{} dates vs {} closes", dates.len(), closes.len()),
        });
    }
    let (Some(&start), Some(&end), Some(&last_close)) = (dates.first(), dates.last(), closes.last())
    else {
        return Err(DcaError::EmptySeries);
    };
    schedule.validate()?;

    let invest_dates = invest_date_set(dates, schedule.invest_day)?;
    let mut ledger = DcaLedger::with_capacity(dates.len());
    let mut shares = 0.0;

    for (i, (&date, &price)) in dates.iter().zip(closes).enumerate() {
        ledger.record_value(date, shares * price);
        if !invest_dates.contains(&date) {
            continue;
        }

        let amount = base_amount * ratio_for_index(i);
        if !(price > 0.0) {
            warn!("{}: skipping purchase on {} (close {})", symbol, date, price);
            continue;
        }
        shares += amount / price;
        ledger.record_outlay(date, amount);
        ledger.revalue_last(shares * price);
    }

    let final_value = shares * last_close;
    Ok(BacktestResult::assemble(
        symbol.to_string(),
        strategy_key,
        (start, end),
        &ledger,
        final_value,
        shares,
        schedule.trailing_years,
    ))
}

/// MA250 + drawdown strategy over a single price history.
pub fn backtest_ma250_drawdown(
    symbol: &str,
    points: &[PricePoint],
    base_amount: f64,
    schedule: &DcaSchedule,
) -> Result<BacktestResult, DcaError> {
    let ratios = ma250_ratio_series(points);
    let (dates, closes) = split_series(points);
    backtest_monthly_dca(
        symbol,
        StrategyKey::Ma250Drawdown,
        &dates,
        &closes,
        |i| ratios[i],
        base_amount,
        schedule,
    )
}
