//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use screener_core::error::ScreenerError;
use screener_indicators::MovingAverageKind;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScreenerConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub signals: SignalSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub runtime: RuntimeSettings,
}

impl ScreenerConfig {
    /// Check cross-field constraints the types cannot express.
    pub fn validate(&self) -> Result<(), ScreenerError> {
        self.indicators.validate()?;
        self.signals.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "stock-screener".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Input locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory with one `{ticker}.csv` per ticker
    pub prices_dir: PathBuf,
    /// Universe CSV (`Ticker,Name,Market`)
    pub universe_file: PathBuf,
    /// Reduced universe used with `--test`
    pub test_universe_file: PathBuf,
    /// Tickers loaded in parallel
    pub fetch_concurrency: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            prices_dir: PathBuf::from("data/prices"),
            universe_file: PathBuf::from("data/universe.csv"),
            test_universe_file: PathBuf::from("data/universe_test.csv"),
            fetch_concurrency: 16,
        }
    }
}

/// Lookback windows for every indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub short_window: usize,
    pub long_window: usize,
    pub moving_average: MovingAverageKind,
    pub rsi_short_period: usize,
    pub rsi_long_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal_period: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            short_window: 5,
            long_window: 25,
            moving_average: MovingAverageKind::Simple,
            rsi_short_period: 9,
            rsi_long_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal_period: 9,
        }
    }
}

impl IndicatorSettings {
    /// Bars needed before any snapshot can be produced.
    pub fn required_history(&self) -> usize {
        [
            self.short_window,
            self.long_window,
            self.rsi_short_period + 1,
            self.rsi_long_period + 1,
            self.macd_slow + self.macd_signal_period,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    fn validate(&self) -> Result<(), ScreenerError> {
        let windows = [
            ("short_window", self.short_window),
            ("long_window", self.long_window),
            ("rsi_short_period", self.rsi_short_period),
            ("rsi_long_period", self.rsi_long_period),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal_period", self.macd_signal_period),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(ScreenerError::Config(format!("{} must be at least 1", name)));
        }
        if self.short_window > self.long_window {
            return Err(ScreenerError::Config(
                "short_window must not exceed long_window".into(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(ScreenerError::Config(
                "macd_fast must be less than macd_slow".into(),
            ));
        }
        Ok(())
    }
}

/// Classification thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalSettings {
    /// BUY requires long RSI at or below this
    pub buy_rsi_long_ceiling: f64,
    /// SELL requires long RSI at or above this
    pub sell_rsi_long_floor: f64,
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            buy_rsi_long_ceiling: 40.0,
            sell_rsi_long_floor: 60.0,
        }
    }
}

impl SignalSettings {
    fn validate(&self) -> Result<(), ScreenerError> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.buy_rsi_long_ceiling) || !in_range(self.sell_rsi_long_floor) {
            return Err(ScreenerError::Config(
                "RSI thresholds must be between 0 and 100".into(),
            ));
        }
        Ok(())
    }
}

/// Result file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub buy_file: String,
    pub sell_file: String,
    pub decimal_places: u32,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("results"),
            buy_file: "signal_result_buy.csv".to_string(),
            sell_file: "signal_result_sell.csv".to_string(),
            decimal_places: 2,
        }
    }
}

impl OutputSettings {
    fn validate(&self) -> Result<(), ScreenerError> {
        if self.decimal_places > 10 {
            return Err(ScreenerError::Config(
                "decimal_places must be at most 10".into(),
            ));
        }
        if self.buy_file.is_empty() || self.sell_file.is_empty() || self.buy_file == self.sell_file {
            return Err(ScreenerError::Config(
                "buy_file and sell_file must be distinct, non-empty names".into(),
            ));
        }
        Ok(())
    }
}

/// Worker settings for the computation stage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Worker threads for indicator computation (0 = one per CPU)
    pub concurrency_limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScreenerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.signals.buy_rsi_long_ceiling, 40.0);
        assert_eq!(config.signals.sell_rsi_long_floor, 60.0);
        assert_eq!(config.output.decimal_places, 2);
    }

    #[test]
    fn test_required_history() {
        let indicators = IndicatorSettings::default();
        // MACD 26 + 9 dominates the defaults
        assert_eq!(indicators.required_history(), 35);

        let indicators = IndicatorSettings {
            long_window: 75,
            ..Default::default()
        };
        assert_eq!(indicators.required_history(), 75);

        let indicators = IndicatorSettings {
            rsi_long_period: 40,
            ..Default::default()
        };
        assert_eq!(indicators.required_history(), 41);
    }

    #[test]
    fn test_rejects_zero_window() {
        let mut config = ScreenerConfig::default();
        config.indicators.rsi_short_period = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_macd() {
        let mut config = ScreenerConfig::default();
        config.indicators.macd_fast = 26;
        config.indicators.macd_slow = 12;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        let mut config = ScreenerConfig::default();
        config.signals.sell_rsi_long_floor = 120.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ScreenerConfig = toml::from_str(
            r#"
            [indicators]
            long_window = 26
            moving_average = "exponential"

            [output]
            decimal_places = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.indicators.long_window, 26);
        assert_eq!(config.indicators.short_window, 5);
        assert_eq!(config.indicators.moving_average, MovingAverageKind::Exponential);
        assert_eq!(config.output.decimal_places, 3);
        assert_eq!(config.output.buy_file, "signal_result_buy.csv");
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let config: ScreenerConfig =
            toml::from_str(include_str!("../../../config/default.toml")).unwrap();
        let defaults = ScreenerConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.indicators.required_history(), defaults.indicators.required_history());
        assert_eq!(config.signals.buy_rsi_long_ceiling, defaults.signals.buy_rsi_long_ceiling);
        assert_eq!(config.output.buy_file, defaults.output.buy_file);
        assert_eq!(config.runtime.concurrency_limit, 0);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screener.toml");
        std::fs::write(&path, "[signals]\nbuy_rsi_long_ceiling = 35.0\n").unwrap();

        let config = crate::load_config(&path).unwrap();
        assert_eq!(config.signals.buy_rsi_long_ceiling, 35.0);
        assert_eq!(config.signals.sell_rsi_long_floor, 60.0);
    }
}
