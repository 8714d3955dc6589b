//! Simple Moving Average.
//!
//! SMA(n)[i] = sum(C[i-j] for j in 0..n) / n
//! Warmup: first (n-1) points are invalid.

use super::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::price::PricePoint;

pub fn calculate_sma(points: &[PricePoint], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(points.len());
    let mut window_sum = 0.0;

    for (i, point) in points.iter().enumerate() {
        window_sum += point.close;
        if period > 0 && i >= period {
            window_sum -= points[i - period].close;
        }

        let valid = period > 0 && i + 1 >= period;
        let value = if valid {
            // Re-sum the window periodically so the running total cannot drift.
            if i % period == 0 {
                window_sum = points[i + 1 - period..=i].iter().map(|p| p.close).sum();
            }
            window_sum / period as f64
        } else {
            0.0
        };

        values.push(IndicatorPoint {
            date: point.date,
            valid,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}
