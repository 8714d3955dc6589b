//! Two-asset monthly DCA with tiered dip buying from a yearly reserve pool.
//!
//! Each scheduled day invests the monthly total split by fixed weights, then
//! asks the tier table (see [`super::tier`]) for an extra contribution, which
//! is capped by the pool's remaining balance for the calendar year and recorded
//! as a second cashflow on the same day.

use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::HashSet;

use super::backtest::{BacktestResult, DcaSchedule};
use super::error::DcaError;
use super::ledger::DcaLedger;
use super::reserve_pool::ReservePool;
use super::schedule::invest_date_set;
use super::strategy::StrategyKey;
use super::tier::{TierKind, select_tier};

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetWeights {
    pub a: f64,
    pub b: f64,
}

impl Default for AssetWeights {
    fn default() -> Self {
        AssetWeights { a: 0.5, b: 0.5 }
    }
}

impl AssetWeights {
    pub fn new(a: f64, b: f64) -> Result<Self, DcaError> {
        let weights = AssetWeights { a, b };
        weights.validate()?;
        Ok(weights)
    }

    pub fn validate(&self) -> Result<(), DcaError> {
        if self.a < 0.0 || self.b < 0.0 || ((self.a + self.b) - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(DcaError::InvalidWeights(self.a, self.b));
        }
        Ok(())
    }

    pub fn split(&self, amount: f64) -> (f64, f64) {
        (amount * self.a, amount * self.b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DipBuyConfig {
    pub monthly_total: f64,
    pub weights: AssetWeights,
    pub annual_pool: f64,
    pub schedule: DcaSchedule,
}

impl Default for DipBuyConfig {
    fn default() -> Self {
        DipBuyConfig {
            monthly_total: 900.0,
            weights: AssetWeights::default(),
            annual_pool: 4000.0,
            schedule: DcaSchedule::default(),
        }
    }
}

/// Date-aligned inputs for the two-asset loop.
///
/// `index` holds the volatility-index reading per day, `None` where missing.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoAssetSeries {
    pub symbols: (String, String),
    pub dates: Vec<NaiveDate>,
    pub closes_a: Vec<f64>,
    pub closes_b: Vec<f64>,
    pub drawdown_a: Vec<f64>,
    pub drawdown_b: Vec<f64>,
    pub index: Vec<Option<f64>>,
}

impl TwoAssetSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn validate(&self) -> Result<(), DcaError> {
        let n = self.dates.len();
        let lengths = [
            ("closes_a", self.closes_a.len()),
            ("closes_b", self.closes_b.len()),
            ("drawdown_a", self.drawdown_a.len()),
            ("drawdown_b", self.drawdown_b.len()),
            ("index", self.index.len()),
        ];
        if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != n) {
            return Err(DcaError::SeriesLengthMismatch {
                reason: format!("{} dates vs {} {}", n, len, name),
            });
        }
        if n == 0 {
            return Err(DcaError::EmptySeries);
        }
        Ok(())
    }
}

/// Mutable state of one pooled run. Never shared between runs.
#[derive(Debug, Clone)]
struct PooledRun<'a> {
    series: &'a TwoAssetSeries,
    config: &'a DipBuyConfig,
    invest_dates: HashSet<NaiveDate>,
    shares_a: f64,
    shares_b: f64,
    pool: ReservePool,
    ledger: DcaLedger,
}

impl<'a> PooledRun<'a> {
    fn new(series: &'a TwoAssetSeries, config: &'a DipBuyConfig) -> Result<Self, DcaError> {
        let invest_dates = invest_date_set(&series.dates, config.schedule.invest_day)?;
        Ok(Self {
            series,
            config,
            invest_dates,
            shares_a: 0.0,
            shares_b: 0.0,
            pool: ReservePool::new(config.annual_pool, series.dates[0]),
            ledger: DcaLedger::with_capacity(series.len()),
        })
    }

    fn holding_value(&self, px_a: f64, px_b: f64) -> f64 {
        self.shares_a * px_a + self.shares_b * px_b
    }

    /// Buy `amount` split by weight; an asset with a non-positive close is
    /// skipped while the full amount is still booked.
    fn buy(&mut self, date: NaiveDate, amount: f64, px_a: f64, px_b: f64) {
        let (amount_a, amount_b) = self.config.weights.split(amount);
        if px_a > 0.0 {
            self.shares_a += amount_a / px_a;
        } else {
            warn!("{}: skipping purchase on {} (close {})", self.series.symbols.0, date, px_a);
        }
        if px_b > 0.0 {
            self.shares_b += amount_b / px_b;
        } else {
            warn!("{}: skipping purchase on {} (close {})", self.series.symbols.1, date, px_b);
        }
        self.ledger.record_outlay(date, amount);
    }

    fn step(&mut self, i: usize) {
        let date = self.series.dates[i];
        let px_a = self.series.closes_a[i];
        let px_b = self.series.closes_b[i];

        self.ledger.record_value(date, self.holding_value(px_a, px_b));
        if self.pool.observe(date) {
            debug!("reserve pool reset to {:.2} for {}", self.pool.nominal(), self.pool.year());
        }
        if !self.invest_dates.contains(&date) {
            return;
        }

        self.buy(date, self.config.monthly_total, px_a, px_b);

        let worst_drawdown = self.series.drawdown_a[i].min(self.series.drawdown_b[i]);
        let tier = select_tier(worst_drawdown, self.series.index[i]);
        let requested = tier
            .extra
            .requested(self.config.monthly_total, self.pool.remaining());
        let extra = self.pool.draw(requested);
        if extra > 0.0 {
            debug!(
                "{}: tier {} (drawdown {:.2}%), extra {:.2}, pool left {:.2}",
                date,
                tier.kind,
                worst_drawdown * 100.0,
                extra,
                self.pool.remaining()
            );
            self.buy(date, extra, px_a, px_b);
        } else if tier.kind != TierKind::Normal {
            debug!("{}: tier {} but reserve pool is empty", date, tier.kind);
        }

        self.ledger.revalue_last(self.holding_value(px_a, px_b));
    }
}

pub fn backtest_two_asset_dca_with_pool(
    series: &TwoAssetSeries,
    config: &DipBuyConfig,
) -> Result<BacktestResult, DcaError> {
    series.validate()?;
    config.schedule.validate()?;
    config.weights.validate()?;

    let mut run = PooledRun::new(series, config)?;
    for i in 0..series.len() {
        run.step(i);
    }

    let last = series.len() - 1;
    let final_value = run.holding_value(series.closes_a[last], series.closes_b[last]);
    Ok(BacktestResult::assemble(
        format!("{},{}", series.symbols.0, series.symbols.1),
        StrategyKey::EtfDcaDipBuy,
        (series.dates[0], series.dates[last]),
        &run.ledger,
        final_value,
        run.shares_a + run.shares_b,
        config.schedule.trailing_years,
    ))
}
