//! Rolling drawdown from the trailing high.
//!
//! DRAWDOWN(n)[i] = (C[i] - max(C[i-j] for j in 0..n)) / max(...)
//! Warmup: first (n-1) points are invalid. Values are <= 0.

use std::collections::VecDeque;

use super::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::price::PricePoint;

pub fn calculate_drawdown(points: &[PricePoint], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(points.len());
    // Monotonic deque of indices whose closes are decreasing; front is the window max.
    let mut maxima: VecDeque<usize> = VecDeque::new();

    for (i, point) in points.iter().enumerate() {
        while let Some(&back) = maxima.back() {
            if points[back].close <= point.close {
                maxima.pop_back();
            } else {
                break;
            }
        }
        maxima.push_back(i);
        if period > 0 {
            while let Some(&front) = maxima.front() {
                if front + period <= i {
                    maxima.pop_front();
                } else {
                    break;
                }
            }
        }

        let valid = period > 0 && i + 1 >= period;
        let value = match maxima.front() {
            Some(&front) if valid => {
                let high = points[front].close;
                (point.close - high) / high
            }
            _ => 0.0,
        };

        values.push(IndicatorPoint {
            date: point.date,
            valid,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Drawdown(period),
        values,
    }
}

/// Drawdown of the last close against the high of the last `window` closes.
///
/// Uses every close when fewer than `window` are available. Returns
/// `(current, high, drawdown)`.
pub fn trailing_drawdown(points: &[PricePoint], window: usize) -> Option<(f64, f64, f64)> {
    let tail = &points[points.len().saturating_sub(window)..];
    let current = tail.last()?.close;
    let high = tail.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max);
    Some((current, high, (current - high) / high))
}
