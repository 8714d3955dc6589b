//! Single-asset contribution sizing: MA250 + drawdown ratio rule.
//!
//! The multiplier scales the base contribution on each investment day:
//!
//! | condition                 | ratio |
//! |---------------------------|-------|
//! | drawdown <= -30%          | 5.0   |
//! | drawdown <= -20%          | 3.0   |
//! | price below MA250         | 2.0   |
//! | otherwise                 | 1.0   |

use super::indicator::{calculate_drawdown, calculate_sma};
use super::price::PricePoint;

/// Sessions in both the moving average and the trailing-high window.
pub const MA_WINDOW: usize = 250;

pub const EXTREME_DRAWDOWN: f64 = -0.30;
pub const DEEP_DRAWDOWN: f64 = -0.20;

/// Contribution multiplier plus the reason it was chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingDecision {
    pub ratio: f64,
    pub label: &'static str,
}

impl SizingDecision {
    pub const EXTREME_FEAR: SizingDecision = SizingDecision {
        ratio: 5.0,
        label: "extreme fear (drawdown >= 30%)",
    };
    pub const DEEP_PULLBACK: SizingDecision = SizingDecision {
        ratio: 3.0,
        label: "deep pullback (drawdown >= 20%)",
    };
    pub const BELOW_MA: SizingDecision = SizingDecision {
        ratio: 2.0,
        label: "below the 250-day moving average",
    };
    pub const NORMAL: SizingDecision = SizingDecision {
        ratio: 1.0,
        label: "uptrend / normal",
    };

    pub fn amount(&self, base_amount: f64) -> f64 {
        base_amount * self.ratio
    }
}

/// First matching threshold wins, evaluated from the deepest drawdown down.
pub fn compute_ma250_drawdown_ratio(price: f64, ma250: f64, drawdown: f64) -> SizingDecision {
    if drawdown <= EXTREME_DRAWDOWN {
        SizingDecision::EXTREME_FEAR
    } else if drawdown <= DEEP_DRAWDOWN {
        SizingDecision::DEEP_PULLBACK
    } else if price < ma250 {
        SizingDecision::BELOW_MA
    } else {
        SizingDecision::NORMAL
    }
}

/// Per-day ratios for a price history.
///
/// Days with index below `MA_WINDOW` have too little history and get 1.0.
pub fn ma250_ratio_series(points: &[PricePoint]) -> Vec<f64> {
    let ma = calculate_sma(points, MA_WINDOW);
    let drawdown = calculate_drawdown(points, MA_WINDOW);

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            if i < MA_WINDOW {
                return SizingDecision::NORMAL.ratio;
            }
            match (ma.valid_at(i), drawdown.valid_at(i)) {
                (Some(ma250), Some(dd)) => compute_ma250_drawdown_ratio(point.close, ma250, dd).ratio,
                _ => SizingDecision::NORMAL.ratio,
            }
        })
        .collect()
}
