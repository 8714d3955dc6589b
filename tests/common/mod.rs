#![allow(dead_code)]

use chrono::NaiveDate;
use dcatrader::cli::{Overrides, RunSettings, load_settings};
use dcatrader::domain::error::DcaError;
pub use dcatrader::domain::price::PricePoint;
use dcatrader::ports::data_port::PriceDataPort;
use std::collections::HashMap;

pub struct MockPriceDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
}

impl MockPriceDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, symbol: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(symbol.to_string(), points);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PricePoint>, DcaError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(DcaError::DataParse {
                reason: reason.clone(),
            });
        }
        let points = self.data.get(symbol).ok_or_else(|| DcaError::NoData {
            symbol: symbol.to_string(),
        })?;
        Ok(points
            .iter()
            .filter(|p| start_date.is_none_or(|s| p.date >= s))
            .filter(|p| end_date.is_none_or(|e| p.date <= e))
            .copied()
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, DcaError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// One close per calendar day starting at `start`.
pub fn daily_closes(start: &str, closes: &[f64]) -> Vec<PricePoint> {
    let start = date(start);
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PricePoint::new(start + chrono::Duration::days(i as i64), c))
        .collect()
}

/// Constant close on every calendar day.
pub fn flat_closes(start: &str, days: usize, close: f64) -> Vec<PricePoint> {
    daily_closes(start, &vec![close; days])
}

/// Default settings with the given overrides applied.
pub fn settings_with(overrides: Overrides) -> RunSettings {
    load_settings(None, &overrides).unwrap()
}
