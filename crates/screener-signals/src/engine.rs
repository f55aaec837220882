//! Per-ticker indicator computation.
//!
//! Turns one ticker's daily series into the indicator values at its latest
//! bar. Indicators run over the full series so that the MACD signal line
//! is warmed up; only the last values survive.

use screener_config::IndicatorSettings;
use screener_core::error::DataError;
use screener_core::traits::{Indicator, MultiOutputIndicator};
use screener_core::types::{Exclusion, IndicatorSnapshot, TickerSeries};
use screener_indicators::{Macd, MovingAverage, Rsi};

/// Computes indicator snapshots with a fixed set of lookback windows.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    short_ma: MovingAverage,
    long_ma: MovingAverage,
    rsi_short: Rsi,
    rsi_long: Rsi,
    macd: Macd,
    required_history: usize,
}

impl IndicatorEngine {
    /// Create an engine from validated indicator settings.
    pub fn new(settings: &IndicatorSettings) -> Self {
        Self {
            short_ma: MovingAverage::new(settings.moving_average, settings.short_window),
            long_ma: MovingAverage::new(settings.moving_average, settings.long_window),
            rsi_short: Rsi::new(settings.rsi_short_period),
            rsi_long: Rsi::new(settings.rsi_long_period),
            macd: Macd::with_periods(
                settings.macd_fast,
                settings.macd_slow,
                settings.macd_signal_period,
            ),
            required_history: settings.required_history(),
        }
    }

    /// Bars a series needs before it gets a snapshot.
    pub fn required_history(&self) -> usize {
        self.required_history
    }

    /// Compute the snapshot at the series' latest bar.
    ///
    /// Malformed or short series are excluded rather than partially
    /// computed.
    pub fn compute(&self, series: &TickerSeries) -> Result<IndicatorSnapshot, Exclusion> {
        series.validate().map_err(|e| match e {
            DataError::MalformedSeries { ticker, detail } => Exclusion::malformed(ticker, detail),
            other => Exclusion::malformed(&series.ticker, other.to_string()),
        })?;

        let insufficient =
            || Exclusion::insufficient_history(&series.ticker, self.required_history, series.len());

        if series.len() < self.required_history {
            return Err(insufficient());
        }

        let last = series.last().ok_or_else(insufficient)?;
        let closes = series.closes();

        let sma_short = self.short_ma.latest(&closes).ok_or_else(insufficient)?;
        let sma_long = self.long_ma.latest(&closes).ok_or_else(insufficient)?;
        let rsi_short = self.rsi_short.latest(&closes).ok_or_else(insufficient)?;
        let rsi_long = self.rsi_long.latest(&closes).ok_or_else(insufficient)?;
        let macd = self.macd.latest(&closes).ok_or_else(insufficient)?;

        Ok(IndicatorSnapshot {
            ticker: series.ticker.clone(),
            date: last.date,
            close: last.close,
            sma_short,
            sma_long,
            rsi_short,
            rsi_long,
            macd_line: macd.macd,
            macd_signal: macd.signal,
            macd_histogram: macd.histogram,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use screener_core::types::{ExclusionReason, PriceBar};
    use screener_indicators::MovingAverageKind;

    fn create_test_series(ticker: &str, closes: &[f64]) -> TickerSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let date = start + Duration::days(i as i64);
                PriceBar::new(date, close, close + 1.0, close - 1.0, close, 1000.0)
            })
            .collect();
        TickerSeries::new(ticker, bars)
    }

    #[test]
    fn test_snapshot_at_latest_bar() {
        let engine = IndicatorEngine::new(&IndicatorSettings::default());
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 4.0).collect();
        let series = create_test_series("7203", &closes);

        let snapshot = engine.compute(&series).unwrap();

        assert_eq!(snapshot.ticker, "7203");
        assert_eq!(snapshot.date, series.last().unwrap().date);
        assert_eq!(snapshot.close, closes[59]);
        let expected_short: f64 = closes[55..].iter().sum::<f64>() / 5.0;
        assert!((snapshot.sma_short - expected_short).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&snapshot.rsi_short));
        assert!((0.0..=100.0).contains(&snapshot.rsi_long));
        assert!(
            (snapshot.macd_histogram - (snapshot.macd_line - snapshot.macd_signal)).abs() < 1e-12
        );
    }

    #[test]
    fn test_exact_required_length_produces_snapshot() {
        let engine = IndicatorEngine::new(&IndicatorSettings::default());
        let closes: Vec<f64> = (0..engine.required_history()).map(|i| 50.0 + i as f64).collect();

        assert!(engine.compute(&create_test_series("6758", &closes)).is_ok());
        assert!(engine
            .compute(&create_test_series("6758", &closes[1..]))
            .is_err());
    }

    #[test]
    fn test_short_history_is_excluded() {
        let settings = IndicatorSettings {
            long_window: 26,
            ..Default::default()
        };
        let engine = IndicatorEngine::new(&settings);
        let series = create_test_series("4385", &[100.0; 10]);

        let exclusion = engine.compute(&series).unwrap_err();
        assert_eq!(exclusion.ticker, "4385");
        assert_eq!(
            exclusion.reason,
            ExclusionReason::InsufficientHistory {
                required: 35,
                available: 10
            }
        );
    }

    #[test]
    fn test_malformed_series_is_excluded() {
        let engine = IndicatorEngine::new(&IndicatorSettings::default());
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        closes[20] = f64::NAN;

        let exclusion = engine.compute(&create_test_series("9984", &closes)).unwrap_err();
        assert!(matches!(exclusion.reason, ExclusionReason::MalformedSeries { .. }));
    }

    #[test]
    fn test_flat_series_is_neutral() {
        let engine = IndicatorEngine::new(&IndicatorSettings::default());
        let snapshot = engine.compute(&create_test_series("1301", &[500.0; 40])).unwrap();

        assert_eq!(snapshot.rsi_short, 50.0);
        assert_eq!(snapshot.rsi_long, 50.0);
        assert!(snapshot.macd_line.abs() < 1e-9);
    }

    #[test]
    fn test_exponential_moving_average_option() {
        let settings = IndicatorSettings {
            moving_average: MovingAverageKind::Exponential,
            ..Default::default()
        };
        let engine = IndicatorEngine::new(&settings);
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 6.0).collect();

        let snapshot = engine.compute(&create_test_series("8306", &closes)).unwrap();
        let ema_short = *screener_indicators::Ema::new(5).calculate(&closes).last().unwrap();
        let sma_short: f64 = closes[35..].iter().sum::<f64>() / 5.0;
        assert!((snapshot.sma_short - ema_short).abs() < 1e-12);
        assert!((snapshot.sma_short - sma_short).abs() > 1e-6);
    }
}
