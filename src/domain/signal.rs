//! Today's recommendation for each strategy, computed from the latest closes.

use chrono::{Datelike, NaiveDate};

use super::error::DcaError;
use super::indicator::drawdown::trailing_drawdown;
use super::pooled_backtest::DipBuyConfig;
use super::price::PricePoint;
use super::sizing::{MA_WINDOW, SizingDecision, compute_ma250_drawdown_ratio};
use super::tier::{TIER_DRAWDOWN_WINDOW, TierRule, select_tier};

/// Fewest closes the dip-buy signal accepts per asset.
pub const DIP_BUY_MIN_HISTORY: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Ma250Signal {
    pub symbol: String,
    pub date: NaiveDate,
    pub price: f64,
    pub ma250: f64,
    pub high: f64,
    pub drawdown: f64,
    pub decision: SizingDecision,
    pub base_amount: f64,
}

impl Ma250Signal {
    pub fn amount(&self) -> f64 {
        self.decision.amount(self.base_amount)
    }
}

pub fn compute_ma250_signal(
    symbol: &str,
    points: &[PricePoint],
    base_amount: f64,
) -> Result<Ma250Signal, DcaError> {
    if points.len() < MA_WINDOW {
        return Err(DcaError::InsufficientData {
            symbol: symbol.to_string(),
            bars: points.len(),
            minimum: MA_WINDOW,
        });
    }
    let tail = &points[points.len() - MA_WINDOW..];
    let ma250 = tail.iter().map(|p| p.close).sum::<f64>() / MA_WINDOW as f64;
    let Some((price, high, drawdown)) = trailing_drawdown(points, MA_WINDOW) else {
        return Err(DcaError::NoData {
            symbol: symbol.to_string(),
        });
    };
    let date = tail[tail.len() - 1].date;

    Ok(Ma250Signal {
        symbol: symbol.to_string(),
        date,
        price,
        ma250,
        high,
        drawdown,
        decision: compute_ma250_drawdown_ratio(price, ma250, drawdown),
        base_amount,
    })
}

/// Latest state of one asset over the tier window.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSnapshot {
    pub symbol: String,
    pub price: f64,
    pub high: f64,
    pub drawdown: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DipBuySignal {
    pub date: NaiveDate,
    pub invest_day: u32,
    pub should_invest: bool,
    pub assets: [AssetSnapshot; 2],
    pub worst_drawdown: f64,
    pub index: Option<f64>,
    pub tier: &'static TierRule,
    pub monthly_total: f64,
    pub extra_total: f64,
    pub base_allocations: (f64, f64),
    pub extra_allocations: (f64, f64),
}

fn snapshot(symbol: &str, points: &[PricePoint]) -> Result<AssetSnapshot, DcaError> {
    if points.len() < DIP_BUY_MIN_HISTORY {
        return Err(DcaError::InsufficientData {
            symbol: symbol.to_string(),
            bars: points.len(),
            minimum: DIP_BUY_MIN_HISTORY,
        });
    }
    let (price, high, drawdown) =
        trailing_drawdown(points, TIER_DRAWDOWN_WINDOW).ok_or_else(|| DcaError::NoData {
            symbol: symbol.to_string(),
        })?;
    Ok(AssetSnapshot {
        symbol: symbol.to_string(),
        price,
        high,
        drawdown,
    })
}

/// Dip-buy recommendation as of `date`.
///
/// The pool is assumed full, so the extreme tier offers half of the nominal
/// annual pool.
pub fn compute_dip_buy_signal(
    date: NaiveDate,
    assets: [(&str, &[PricePoint]); 2],
    index: &[PricePoint],
    config: &DipBuyConfig,
) -> Result<DipBuySignal, DcaError> {
    config.schedule.validate()?;
    config.weights.validate()?;

    let [(symbol_a, points_a), (symbol_b, points_b)] = assets;
    let a = snapshot(symbol_a, points_a)?;
    let b = snapshot(symbol_b, points_b)?;

    let worst_drawdown = 0.0_f64.min(a.drawdown).min(b.drawdown);
    let index = index.iter().rev().map(|p| p.close).find(|v| !v.is_nan());
    let tier = select_tier(worst_drawdown, index);
    let extra_total = tier.extra.requested(config.monthly_total, config.annual_pool);

    Ok(DipBuySignal {
        date,
        invest_day: config.schedule.invest_day,
        should_invest: date.day() == config.schedule.invest_day,
        assets: [a, b],
        worst_drawdown,
        index,
        tier,
        monthly_total: config.monthly_total,
        extra_total,
        base_allocations: config.weights.split(config.monthly_total),
        extra_allocations: config.weights.split(extra_total),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tier::TierKind;
    use approx::assert_abs_diff_eq;

    fn series(closes: &[f64]) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + chrono::Duration::days(i as i64), c))
            .collect()
    }

    #[test]
    fn ma250_requires_full_window() {
        let err = compute_ma250_signal("QQQ", &series(&[100.0; 249]), 10_000.0).unwrap_err();
        assert!(matches!(
            err,
            DcaError::InsufficientData {
                bars: 249,
                minimum: 250,
                ..
            }
        ));
    }

    #[test]
    fn ma250_normal_market() {
        let closes: Vec<f64> = (0..300).map(|i| 100.0 + i as f64).collect();
        let signal = compute_ma250_signal("QQQ", &series(&closes), 10_000.0).unwrap();
        assert_eq!(signal.price, 399.0);
        assert_eq!(signal.high, 399.0);
        assert_eq!(signal.drawdown, 0.0);
        assert_abs_diff_eq!(signal.ma250, 274.5, epsilon = 1e-9);
        assert_eq!(signal.decision, SizingDecision::NORMAL);
        assert_eq!(signal.amount(), 10_000.0);
    }

    #[test]
    fn ma250_deep_drawdown() {
        let mut closes = vec![100.0; 260];
        *closes.last_mut().unwrap() = 75.0;
        let signal = compute_ma250_signal("QQQ", &series(&closes), 1000.0).unwrap();
        assert_abs_diff_eq!(signal.drawdown, -0.25, epsilon = 1e-12);
        assert_eq!(signal.decision, SizingDecision::DEEP_PULLBACK);
        assert_eq!(signal.amount(), 3000.0);
    }

    #[test]
    fn dip_buy_requires_history() {
        let short = series(&[10.0; 29]);
        let long = series(&[10.0; 60]);
        let err = compute_dip_buy_signal(
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            [("VOO", &long[..]), ("QQQM", &short[..])],
            &[],
            &DipBuyConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DcaError::InsufficientData { minimum: 30, .. }));
    }

    #[test]
    fn dip_buy_extreme_uses_pool() {
        let mut crashed = vec![100.0; 60];
        *crashed.last_mut().unwrap() = 60.0;
        let steady = series(&[50.0; 60]);
        let crashed = series(&crashed);
        let date = NaiveDate::from_ymd_opt(2023, 3, 10).unwrap();
        let signal = compute_dip_buy_signal(
            date,
            [("VOO", &steady[..]), ("QQQM", &crashed[..])],
            &series(&[30.0]),
            &DipBuyConfig::default(),
        )
        .unwrap();

        assert!(signal.should_invest);
        assert_abs_diff_eq!(signal.worst_drawdown, -0.4, epsilon = 1e-12);
        assert_eq!(signal.tier.kind, TierKind::Extreme);
        assert_eq!(signal.extra_total, 2000.0);
        assert_eq!(signal.base_allocations, (450.0, 450.0));
        assert_eq!(signal.extra_allocations, (1000.0, 1000.0));
        assert_eq!(signal.index, Some(30.0));
    }

    #[test]
    fn dip_buy_mild_fear_needs_index() {
        let mut closes = vec![100.0; 60];
        *closes.last_mut().unwrap() = 90.0;
        let dipped = series(&closes);
        let date = NaiveDate::from_ymd_opt(2023, 3, 2).unwrap();
        let config = DipBuyConfig::default();

        let calm = compute_dip_buy_signal(date, [("A", &dipped[..]), ("B", &dipped[..])], &[], &config).unwrap();
        assert_eq!(calm.tier.kind, TierKind::Normal);
        assert_eq!(calm.extra_total, 0.0);
        assert!(!calm.should_invest);

        let fearful =
            compute_dip_buy_signal(date, [("A", &dipped[..]), ("B", &dipped[..])], &series(&[22.0]), &config)
                .unwrap();
        assert_eq!(fearful.tier.kind, TierKind::MildFear);
        assert_eq!(fearful.extra_total, 225.0);
    }
}
