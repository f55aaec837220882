//! CSV price source.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use screener_core::error::DataError;
use screener_core::traits::PriceSource;
use screener_core::types::PriceBar;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// Reads daily bars from one CSV file per ticker in a directory.
///
/// Files are looked up as `{ticker}.csv`, `{ticker}_daily.csv` and their
/// lowercase variants.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    dir: PathBuf,
}

impl CsvPriceSource {
    /// Create a new CSV price source over a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::Io {
                path: dir.display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "price directory not found"),
            });
        }
        Ok(Self { dir })
    }

    /// Find the file holding a ticker's bars.
    fn resolve(&self, ticker: &str) -> Option<PathBuf> {
        let lower = ticker.to_lowercase();
        [
            format!("{}.csv", ticker),
            format!("{}.csv", lower),
            format!("{}_daily.csv", ticker),
            format!("{}_daily.csv", lower),
        ]
        .into_iter()
        .map(|name| self.dir.join(name))
        .find(|path| path.is_file())
    }

    /// Load bars from a specific path, sorted by date.
    fn load_from_path(path: &Path) -> Result<Vec<PriceBar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::ParseError(format!("{}: {}", path.display(), e)))?;

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord =
                result.map_err(|e| DataError::ParseError(format!("{}: {}", path.display(), e)))?;

            let date = parse_date(&record.date)?;

            bars.push(PriceBar::new(
                date,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        // Sort by date; duplicates are left for series validation to reject
        bars.sort_by_key(|b| b.date);

        Ok(bars)
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    async fn fetch_series(&self, ticker: &str) -> Result<Vec<PriceBar>, DataError> {
        let path = self
            .resolve(ticker)
            .ok_or_else(|| DataError::TickerNotFound(ticker.to_string()))?;

        tokio::task::spawn_blocking(move || Self::load_from_path(&path))
            .await
            .map_err(|e| DataError::ParseError(format!("reader task failed: {}", e)))?
    }

    fn name(&self) -> &str {
        "csv"
    }
}

/// Parse the date formats seen in provider exports.
fn parse_date(date_str: &str) -> Result<NaiveDate, DataError> {
    let formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

    for format in formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d);
        }
    }

    // Intraday-stamped exports of daily bars
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.date());
        }
    }

    // Try parsing as Unix timestamp
    if let Ok(ts) = date_str.parse::<i64>() {
        // Assume milliseconds if > 10 digits
        let dt = if ts > 10_000_000_000 {
            DateTime::from_timestamp_millis(ts)
        } else {
            DateTime::from_timestamp(ts, 0)
        };
        if let Some(dt) = dt {
            return Ok(dt.date_naive());
        }
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}
