//! Result persistence.
//!
//! Numbers are rounded here and nowhere else. Both files are staged next
//! to their targets and only moved into place once both were written. If
//! the second move fails, the previous buy file is put back.

use rust_decimal::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use screener_config::OutputSettings;
use screener_core::error::OutputError;
use screener_core::types::SignalRecord;
use tracing::{debug, info, warn};

use crate::ResultSet;

/// Column names of both result files.
pub const OUTPUT_HEADER: [&str; 12] = [
    "Ticker",
    "Market",
    "Name",
    "Date",
    "Close",
    "SMA_Short",
    "SMA_Long",
    "RSI_Short",
    "RSI_Long",
    "MACD",
    "MACD_Signal",
    "MACD_Histogram",
];

/// Where a persist call put its rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistSummary {
    pub buy_path: PathBuf,
    pub buy_rows: usize,
    pub sell_path: PathBuf,
    pub sell_rows: usize,
}

/// Output boundary for the two result sets.
pub trait ResultSink {
    /// Persist both result sets, or neither.
    fn persist(&self, buy: &ResultSet, sell: &ResultSet) -> Result<PersistSummary, OutputError>;
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    ticker: &'a str,
    market: &'a str,
    name: &'a str,
    date: String,
    close: String,
    sma_short: String,
    sma_long: String,
    rsi_short: String,
    rsi_long: String,
    macd: String,
    macd_signal: String,
    macd_histogram: String,
}

impl<'a> OutputRow<'a> {
    fn new(record: &'a SignalRecord, dp: u32) -> Self {
        Self {
            ticker: &record.ticker,
            market: &record.market_segment,
            name: &record.name,
            date: record.date.format("%Y-%m-%d").to_string(),
            close: format_decimal(record.close, dp),
            sma_short: format_decimal(record.sma_short, dp),
            sma_long: format_decimal(record.sma_long, dp),
            rsi_short: format_decimal(record.rsi_short, dp),
            rsi_long: format_decimal(record.rsi_long, dp),
            macd: format_decimal(record.macd_line, dp),
            macd_signal: format_decimal(record.macd_signal, dp),
            macd_histogram: format_decimal(record.macd_histogram, dp),
        }
    }
}

/// Round to `dp` places (half to even) with a fixed number of decimals.
///
/// Non-finite values render as an empty field.
pub fn format_decimal(value: f64, dp: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let mut rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
            rounded.rescale(dp);
            rounded.to_string()
        }
        None => String::new(),
    }
}

/// Writes each result set to its own CSV file.
#[derive(Debug, Clone)]
pub struct CsvResultWriter {
    directory: PathBuf,
    buy_file: String,
    sell_file: String,
    decimal_places: u32,
}

impl CsvResultWriter {
    pub fn new(settings: &OutputSettings) -> Self {
        Self {
            directory: settings.directory.clone(),
            buy_file: settings.buy_file.clone(),
            sell_file: settings.sell_file.clone(),
            decimal_places: settings.decimal_places,
        }
    }

    /// Send output to another directory.
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn buy_path(&self) -> PathBuf {
        self.directory.join(&self.buy_file)
    }

    pub fn sell_path(&self) -> PathBuf {
        self.directory.join(&self.sell_file)
    }

    fn sibling(target: &Path, suffix: &str) -> PathBuf {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        target.with_file_name(format!(".{}.{}", name, suffix))
    }

    fn write_set(&self, path: &Path, set: &ResultSet) -> Result<(), OutputError> {
        let failure = |detail: String| OutputError::AggregationFailure {
            path: path.display().to_string(),
            detail,
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .map_err(|e| failure(e.to_string()))?;

        // Header written explicitly so empty sets still get one
        writer
            .write_record(OUTPUT_HEADER)
            .map_err(|e| failure(e.to_string()))?;
        for record in set {
            writer
                .serialize(OutputRow::new(record, self.decimal_places))
                .map_err(|e| failure(e.to_string()))?;
        }
        writer.flush().map_err(|e| failure(e.to_string()))?;

        Ok(())
    }

    fn stage_both(
        &self,
        buy: &ResultSet,
        sell: &ResultSet,
        buy_tmp: &Path,
        sell_tmp: &Path,
    ) -> Result<(), OutputError> {
        self.write_set(buy_tmp, buy)?;
        self.write_set(sell_tmp, sell)?;
        self.commit(buy_tmp, sell_tmp)
    }

    /// Move both staged files into place, restoring the old buy file when
    /// the sell file cannot follow.
    fn commit(&self, buy_tmp: &Path, sell_tmp: &Path) -> Result<(), OutputError> {
        let buy_path = self.buy_path();
        let sell_path = self.sell_path();
        let backup = Self::sibling(&buy_path, "bak");

        let rename = |from: &Path, to: &Path| {
            fs::rename(from, to).map_err(|e| OutputError::AggregationFailure {
                path: to.display().to_string(),
                detail: e.to_string(),
            })
        };

        let had_previous = buy_path.is_file();
        if had_previous {
            rename(&buy_path, &backup)?;
        }

        match rename(buy_tmp, &buy_path).and_then(|_| rename(sell_tmp, &sell_path)) {
            Ok(()) => {
                if had_previous {
                    let _ = fs::remove_file(&backup);
                }
                Ok(())
            }
            Err(e) => {
                if had_previous {
                    let _ = fs::rename(&backup, &buy_path);
                } else if buy_path.is_file() {
                    let _ = fs::remove_file(&buy_path);
                }
                warn!(path = %buy_path.display(), "Result commit failed, buy file rolled back");
                Err(e)
            }
        }
    }
}

impl ResultSink for CsvResultWriter {
    fn persist(&self, buy: &ResultSet, sell: &ResultSet) -> Result<PersistSummary, OutputError> {
        fs::create_dir_all(&self.directory).map_err(|e| OutputError::AggregationFailure {
            path: self.directory.display().to_string(),
            detail: e.to_string(),
        })?;

        let buy_path = self.buy_path();
        let sell_path = self.sell_path();
        let buy_tmp = Self::sibling(&buy_path, "tmp");
        let sell_tmp = Self::sibling(&sell_path, "tmp");

        if let Err(e) = self.stage_both(buy, sell, &buy_tmp, &sell_tmp) {
            for tmp in [&buy_tmp, &sell_tmp] {
                if tmp.exists() {
                    let _ = fs::remove_file(tmp);
                }
            }
            return Err(e);
        }

        debug!(path = %buy_path.display(), rows = buy.len(), "Wrote buy signals");
        debug!(path = %sell_path.display(), rows = sell.len(), "Wrote sell signals");
        info!(buy = buy.len(), sell = sell.len(), directory = %self.directory.display(), "Results persisted");

        Ok(PersistSummary {
            buy_path,
            buy_rows: buy.len(),
            sell_path,
            sell_rows: sell.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(ticker: &str, close: f64, rsi_long: f64) -> SignalRecord {
        SignalRecord {
            ticker: ticker.to_string(),
            market_segment: "Prime".to_string(),
            name: format!("Company {}", ticker),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            close,
            sma_short: 101.256,
            sma_long: 99.0,
            rsi_short: 70.0,
            rsi_long,
            macd_line: 1.234567,
            macd_signal: 1.0,
            macd_histogram: 0.234567,
        }
    }

    fn writer(dir: &Path) -> CsvResultWriter {
        CsvResultWriter::new(&OutputSettings::default()).with_directory(dir)
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(3500.0, 2), "3500.00");
        assert_eq!(format_decimal(101.256, 2), "101.26");
        assert_eq!(format_decimal(-1.005, 1), "-1.0");
        assert_eq!(format_decimal(0.125, 2), "0.12"); // exact midpoint, to even
        assert_eq!(format_decimal(39.996, 0), "40");
        assert_eq!(format_decimal(f64::NAN, 2), "");
        assert_eq!(
            Decimal::from_str(&format_decimal(1.5, 3)).unwrap(),
            dec!(1.500)
        );
    }

    #[test]
    fn test_persist_writes_sorted_rounded_rows() {
        let dir = tempfile::tempdir().unwrap();
        let buy = ResultSet::from_records(vec![record("7203", 3500.0, 35.0), record("4385", 2100.5, 38.123)]);
        let sell = ResultSet::default();

        let summary = writer(dir.path()).persist(&buy, &sell).unwrap();
        assert_eq!(summary.buy_rows, 2);
        assert_eq!(summary.sell_rows, 0);

        let content = fs::read_to_string(&summary.buy_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], OUTPUT_HEADER.join(","));
        assert_eq!(
            lines[1],
            "4385,Prime,Company 4385,2024-03-01,2100.50,101.26,99.00,70.00,38.12,1.23,1.00,0.23"
        );
        assert!(lines[2].starts_with("7203,"));
    }

    #[test]
    fn test_empty_sets_still_have_headers() {
        let dir = tempfile::tempdir().unwrap();
        let summary = writer(dir.path())
            .persist(&ResultSet::default(), &ResultSet::default())
            .unwrap();

        for path in [&summary.buy_path, &summary.sell_path] {
            let content = fs::read_to_string(path).unwrap();
            assert_eq!(content.trim_end(), OUTPUT_HEADER.join(","));
        }
    }

    #[test]
    fn test_persist_is_byte_identical_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let buy = ResultSet::from_records(vec![record("7203", 3500.0, 35.0)]);
        let sell = ResultSet::from_records(vec![record("6758", 12000.0, 65.0)]);
        let writer = writer(dir.path());

        writer.persist(&buy, &sell).unwrap();
        let first = (
            fs::read(writer.buy_path()).unwrap(),
            fs::read(writer.sell_path()).unwrap(),
        );
        writer.persist(&buy, &sell).unwrap();
        let second = (
            fs::read(writer.buy_path()).unwrap(),
            fs::read(writer.sell_path()).unwrap(),
        );

        assert_eq!(first, second);
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp") || name.ends_with(".bak"))
            .collect()
    }

    #[test]
    fn test_failed_sell_commit_restores_previous_buy_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer(dir.path());
        fs::write(writer.buy_path(), "previous run\n").unwrap();
        // A directory on the sell path makes the second rename fail
        fs::create_dir_all(writer.sell_path().join("occupied")).unwrap();

        let buy = ResultSet::from_records(vec![record("7203", 3500.0, 35.0)]);
        let result = writer.persist(&buy, &ResultSet::default());

        assert!(matches!(result, Err(OutputError::AggregationFailure { .. })));
        assert_eq!(fs::read_to_string(writer.buy_path()).unwrap(), "previous run\n");
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_failed_first_run_leaves_no_buy_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer(dir.path());
        fs::create_dir_all(writer.sell_path().join("occupied")).unwrap();

        let buy = ResultSet::from_records(vec![record("7203", 3500.0, 35.0)]);
        let result = writer.persist(&buy, &ResultSet::default());

        assert!(matches!(result, Err(OutputError::AggregationFailure { .. })));
        assert!(!writer.buy_path().exists());
        assert!(leftovers(dir.path()).is_empty());
    }
}
