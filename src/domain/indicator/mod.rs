//! Rolling indicators over daily closes.
//!
//! - `IndicatorPoint`: one dated value with a validity flag
//! - `IndicatorType`: indicator identity + window length
//! - `IndicatorSeries`: a full series aligned 1:1 with its input closes
//!
//! A point is invalid until the rolling window has seen `period` closes.

pub mod drawdown;
pub mod sma;

pub use drawdown::calculate_drawdown;
pub use sma::calculate_sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    /// Fractional decline from the rolling high; non-positive.
    Drawdown(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value at `index` if the window was full there.
    pub fn valid_at(&self, index: usize) -> Option<f64> {
        self.values
            .get(index)
            .filter(|p| p.valid && !p.value.is_nan())
            .map(|p| p.value)
    }

    /// Values with warm-up points replaced by `fill`.
    pub fn filled(&self, fill: f64) -> Vec<f64> {
        self.values
            .iter()
            .map(|p| if p.valid && !p.value.is_nan() { p.value } else { fill })
            .collect()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Drawdown(period) => write!(f, "DRAWDOWN({})", period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, valid: bool, value: f64) -> IndicatorPoint {
        IndicatorPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            valid,
            value,
        }
    }

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(250).to_string(), "SMA(250)");
        assert_eq!(IndicatorType::Drawdown(126).to_string(), "DRAWDOWN(126)");
    }

    #[test]
    fn valid_at_respects_flag() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(2),
            values: vec![point(1, false, 0.0), point(2, true, 10.5)],
        };
        assert_eq!(series.valid_at(0), None);
        assert_eq!(series.valid_at(1), Some(10.5));
        assert_eq!(series.valid_at(2), None);
    }

    #[test]
    fn filled_replaces_warmup() {
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Drawdown(2),
            values: vec![point(1, false, 0.0), point(2, true, -0.1), point(3, true, f64::NAN)],
        };
        assert_eq!(series.filled(0.0), vec![0.0, -0.1, 0.0]);
    }
}
