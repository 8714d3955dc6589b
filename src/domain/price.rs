//! Daily closing-price points and parallel series helpers.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Split points into the parallel (dates, closes) form the simulation loops take.
pub fn split_series(points: &[PricePoint]) -> (Vec<NaiveDate>, Vec<f64>) {
    points.iter().map(|p| (p.date, p.close)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_series_keeps_order() {
        let points = vec![
            PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 10.0),
            PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(), 11.0),
        ];
        let (dates, closes) = split_series(&points);
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[1], NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(closes, vec![10.0, 11.0]);
    }

    #[test]
    fn split_series_empty() {
        let (dates, closes) = split_series(&[]);
        assert!(dates.is_empty());
        assert!(closes.is_empty());
    }
}
