//! CSV file price adapter.
//!
//! One file per symbol, `<dir>/<SYMBOL>.csv`, with a header row. The `date`
//! and `close` columns are found by name, so extra columns (open, volume,
//! adjusted close) are ignored.

use crate::domain::error::DcaError;
use crate::domain::price::PricePoint;
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn column(headers: &csv::StringRecord, name: &str) -> Result<usize, DcaError> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| DcaError::DataParse {
                reason: format!("missing {} column", name),
            })
    }

    /// Accepts `YYYY-MM-DD` optionally followed by a time part.
    fn parse_date(value: &str) -> Result<NaiveDate, DcaError> {
        let value = value.trim();
        let day = value.get(..10).unwrap_or(value);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| DcaError::DataParse {
            reason: format!("invalid date '{}': {}", value, e),
        })
    }
}

impl PriceDataPort for CsvAdapter {
    fn fetch_closes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PricePoint>, DcaError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DcaError::NoData {
                symbol: symbol.to_string(),
            },
            _ => DcaError::DataParse {
                reason: format!("failed to read {}: {}", path.display(), e),
            },
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| DcaError::DataParse {
                reason: format!("CSV header error in {}: {}", path.display(), e),
            })?
            .clone();
        let date_col = Self::column(&headers, "date")?;
        let close_col = Self::column(&headers, "close")?;

        let mut by_date = BTreeMap::new();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let record = result.map_err(|e| DcaError::DataParse {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).ok_or_else(|| DcaError::DataParse {
                reason: "missing date value".into(),
            })?;
            let date = Self::parse_date(date_str)?;

            if start_date.is_some_and(|start| date < start) || end_date.is_some_and(|end| date > end)
            {
                continue;
            }

            let close = record
                .get(close_col)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|c| c.is_finite());
            match close {
                // Later rows for the same date replace earlier ones.
                Some(close) => {
                    by_date.insert(date, close);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("{}: skipped {} rows without a usable close", symbol, skipped);
        }

        Ok(by_date
            .into_iter()
            .map(|(date, close)| PricePoint::new(date, close))
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, DcaError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| DcaError::DataParse {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| DcaError::DataParse {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = "Date,Open,High,Low,Close,Volume\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n";

        fs::write(path.join("SPY.csv"), csv_content).unwrap();
        fs::write(path.join("QQQ.csv"), "date,close\n").unwrap();
        fs::write(path.join("notes.txt"), "not a price file").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_closes_sorts_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter.fetch_closes("SPY", None, None).unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], PricePoint::new(d(2024, 1, 15), 105.0));
        assert_eq!(points[2], PricePoint::new(d(2024, 1, 17), 115.0));
    }

    #[test]
    fn fetch_closes_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter
            .fetch_closes("SPY", Some(d(2024, 1, 16)), Some(d(2024, 1, 16)))
            .unwrap();

        assert_eq!(points, vec![PricePoint::new(d(2024, 1, 16), 110.0)]);
    }

    #[test]
    fn fetch_closes_skips_bad_closes_and_dedups() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("VIX.csv"),
            "close,date\n\
             20.5,2024-01-02 00:00:00-05:00\n\
             ,2024-01-03\n\
             nan,2024-01-04\n\
             21.0,2024-01-05\n\
             22.0,2024-01-05\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let points = adapter.fetch_closes("VIX", None, None).unwrap();
        assert_eq!(
            points,
            vec![
                PricePoint::new(d(2024, 1, 2), 20.5),
                PricePoint::new(d(2024, 1, 5), 22.0),
            ]
        );
    }

    #[test]
    fn fetch_closes_missing_file_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch_closes("XYZ", None, None);
        assert!(matches!(result, Err(DcaError::NoData { symbol }) if symbol == "XYZ"));
    }

    #[test]
    fn fetch_closes_requires_close_column() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("BAD.csv"), "date,price\n2024-01-02,1.0\n").unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let result = adapter.fetch_closes("BAD", None, None);
        assert!(matches!(result, Err(DcaError::DataParse { .. })));
    }

    #[test]
    fn list_symbols_returns_csv_stems() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let symbols = adapter.list_symbols().unwrap();
        assert_eq!(symbols, vec!["QQQ", "SPY"]);
    }
}
