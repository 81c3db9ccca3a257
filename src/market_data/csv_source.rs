// =============================================================================
// CSV Price Source — locally stored daily history
// =============================================================================
//
// Reads `<data_dir>/<TICKER>.csv`. The first row is a header. The first
// column holds the date (`YYYY-MM-DD`, anything after the first ten
// characters is ignored); the close is taken from the column named `Close`
// (case-insensitive) or, when there is none, from the second column.
//
// Rows whose close is empty, `null` or zero are skipped (market holidays in
// exported history). Rows dated before the requested start are dropped.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::market_data::PriceSource;
use crate::types::{PricePoint, PriceSeries};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    data_dir: PathBuf,
}

impl CsvPriceSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the history file for `ticker`.
    pub fn path_for(&self, ticker: &str) -> Result<PathBuf> {
        if ticker.is_empty() || ticker.contains(['/', '\\']) || ticker.starts_with('.') {
            return Err(AnalysisError::DataSource(format!(
                "invalid ticker symbol {ticker:?}"
            )));
        }
        Ok(self.data_dir.join(format!("{ticker}.csv")))
    }
}

impl PriceSource for CsvPriceSource {
    fn fetch(&self, ticker: &str, start: NaiveDate) -> Result<Option<PriceSeries>> {
        let path = self.path_for(ticker)?;
        if !path.exists() {
            info!(ticker, path = %path.display(), "No local history for ticker");
            return Ok(None);
        }

        let closes = load_closes(&path)?;
        let points: Vec<PricePoint> = closes
            .into_iter()
            .filter(|(date, _)| *date >= start)
            .map(|(date, close)| PricePoint { date, close })
            .collect();

        debug!(ticker, points = points.len(), start = %start, "Loaded local history");

        if points.is_empty() {
            return Ok(None);
        }
        PriceSeries::new(points).map(Some)
    }
}

// =============================================================================
// Parsing
// =============================================================================

fn load_closes(path: &Path) -> Result<BTreeMap<NaiveDate, f64>> {
    let file = File::open(path).map_err(|e| source_error(path, 0, e))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line.map_err(|e| source_error(path, 1, e))?,
        None => return Ok(BTreeMap::new()),
    };
    let close_col = close_column(&header);

    let mut closes = BTreeMap::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        let line = line.map_err(|e| source_error(path, line_no, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let raw_close = fields.get(close_col).copied().unwrap_or("");
        if raw_close.is_empty() || raw_close.eq_ignore_ascii_case("null") {
            continue;
        }

        let raw_date = fields[0].get(..10).unwrap_or(fields[0]);
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
            .map_err(|e| source_error(path, line_no, e))?;
        let close: f64 = raw_close
            .parse()
            .map_err(|e| source_error(path, line_no, e))?;

        if close == 0.0 {
            continue;
        }
        closes.insert(date, close);
    }

    Ok(closes)
}

/// Index of the `Close` column, falling back to the second column.
fn close_column(header: &str) -> usize {
    header
        .split(',')
        .position(|h| h.trim().eq_ignore_ascii_case("close"))
        .unwrap_or(1)
}

fn source_error(path: &Path, line: usize, e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::DataSource(format!("{}:{line}: {e}", path.display()))
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reads_yahoo_style_export() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("AAPL.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2024-01-02,1,1,1,10.5,10.4,100\n\
             2024-01-03,1,1,1,null,null,null\n\
             2024-01-04,1,1,1,11.0,10.9,100\n",
        )
        .unwrap();

        let src = CsvPriceSource::new(dir.path());
        let series = src.fetch("AAPL", date(2020, 1, 1)).unwrap().unwrap();
        assert_eq!(series.closes(), vec![10.5, 11.0]);
        assert_eq!(series.dates(), vec![date(2024, 1, 2), date(2024, 1, 4)]);
    }

    #[test]
    fn two_column_file_and_start_filter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ITX.MC.csv"),
            "date,price\n2023-12-29,30.0\n2024-01-02,31.0\n2024-01-03,32.0\n",
        )
        .unwrap();

        let src = CsvPriceSource::new(dir.path());
        let series = src.fetch("ITX.MC", date(2024, 1, 1)).unwrap().unwrap();
        assert_eq!(series.closes(), vec![31.0, 32.0]);
    }

    #[test]
    fn unsorted_rows_are_ordered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("MSFT.csv"),
            "Date,Close\n2024-01-03,2.0\n2024-01-02,1.0\n",
        )
        .unwrap();

        let series = CsvPriceSource::new(dir.path())
            .fetch("MSFT", date(2024, 1, 1))
            .unwrap()
            .unwrap();
        assert_eq!(series.closes(), vec![1.0, 2.0]);
    }

    #[test]
    fn missing_file_is_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let src = CsvPriceSource::new(dir.path());
        assert!(src.fetch("NVDA", date(2020, 1, 1)).unwrap().is_none());
    }

    #[test]
    fn nothing_after_start_is_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("TSLA.csv"), "Date,Close\n2019-05-01,5.0\n").unwrap();
        let src = CsvPriceSource::new(dir.path());
        assert!(src.fetch("TSLA", date(2020, 1, 1)).unwrap().is_none());
    }

    #[test]
    fn malformed_row_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("BAD.csv"), "Date,Close\nyesterday,5.0\n").unwrap();
        let err = CsvPriceSource::new(dir.path())
            .fetch("BAD", date(2020, 1, 1))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DataSource(_)));
        assert!(err.to_string().contains("BAD.csv:2"));
    }

    #[test]
    fn negative_close_is_invalid_series() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("NEG.csv"), "Date,Close\n2024-01-02,-1.0\n").unwrap();
        let err = CsvPriceSource::new(dir.path())
            .fetch("NEG", date(2020, 1, 1))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSeries(_)));
    }

    #[test]
    fn rejects_path_like_tickers() {
        let src = CsvPriceSource::new("data");
        assert!(src.path_for("../etc/passwd").is_err());
        assert!(src.path_for("").is_err());
        assert!(src.path_for("SAN.MC").is_ok());
    }
}
