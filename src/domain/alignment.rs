//! Date alignment of two asset histories and an optional volatility index.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::indicator::calculate_drawdown;
use super::pooled_backtest::TwoAssetSeries;
use super::price::PricePoint;
use super::tier::TIER_DRAWDOWN_WINDOW;

/// Inner-join `a` and `b` on date, then attach `index` by date.
///
/// Index gaps are forward-filled from earlier aligned days; gaps before the
/// first reading stay `None`. Drawdowns use the tier window over the aligned
/// closes, with warm-up days reported as 0.0.
pub fn align_two_assets(
    symbols: (&str, &str),
    a: &[PricePoint],
    b: &[PricePoint],
    index: &[PricePoint],
) -> TwoAssetSeries {
    let b_by_date: BTreeMap<NaiveDate, f64> = b.iter().map(|p| (p.date, p.close)).collect();
    let index_by_date: BTreeMap<NaiveDate, f64> = index
        .iter()
        .filter(|p| !p.close.is_nan())
        .map(|p| (p.date, p.close))
        .collect();

    let mut joined_a = Vec::with_capacity(a.len());
    let mut joined_b = Vec::with_capacity(a.len());
    let mut readings = Vec::with_capacity(a.len());
    let mut last_reading = None;

    let a_by_date: BTreeMap<NaiveDate, f64> = a.iter().map(|p| (p.date, p.close)).collect();
    for (&date, &close_a) in &a_by_date {
        let Some(&close_b) = b_by_date.get(&date) else {
            continue;
        };
        if let Some(&reading) = index_by_date.get(&date) {
            last_reading = Some(reading);
        }
        joined_a.push(PricePoint::new(date, close_a));
        joined_b.push(PricePoint::new(date, close_b));
        readings.push(last_reading);
    }

    let drawdown_a = calculate_drawdown(&joined_a, TIER_DRAWDOWN_WINDOW).filled(0.0);
    let drawdown_b = calculate_drawdown(&joined_b, TIER_DRAWDOWN_WINDOW).filled(0.0);

    TwoAssetSeries {
        symbols: (symbols.0.to_string(), symbols.1.to_string()),
        dates: joined_a.iter().map(|p| p.date).collect(),
        closes_a: joined_a.iter().map(|p| p.close).collect(),
        closes_b: joined_b.iter().map(|p| p.close).collect(),
        drawdown_a,
        drawdown_b,
        index: readings,
    }
}
