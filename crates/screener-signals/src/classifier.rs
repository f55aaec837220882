//! Threshold rules mapping a snapshot to BUY, SELL or NONE.
//!
//! BUY when the MACD line is above its signal line, short RSI is above long
//! RSI, and long RSI is at or below the buy ceiling. SELL is the mirror
//! image against the sell floor. The two MACD conditions are strict
//! opposites, so no snapshot can satisfy both rules.

use screener_config::SignalSettings;
use screener_core::types::{Exclusion, IndicatorSnapshot, SignalType};

/// Pure classifier over the latest indicator values.
#[derive(Debug, Clone, Copy)]
pub struct SignalClassifier {
    buy_rsi_long_ceiling: f64,
    sell_rsi_long_floor: f64,
}

impl SignalClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(settings: &SignalSettings) -> Self {
        Self {
            buy_rsi_long_ceiling: settings.buy_rsi_long_ceiling,
            sell_rsi_long_floor: settings.sell_rsi_long_floor,
        }
    }

    /// Classify one snapshot. Values are compared unrounded.
    pub fn classify(&self, snapshot: &IndicatorSnapshot) -> SignalType {
        if self.is_buy(snapshot) {
            SignalType::Buy
        } else if self.is_sell(snapshot) {
            SignalType::Sell
        } else {
            SignalType::None
        }
    }

    /// Classify a computation outcome; excluded tickers are always NONE.
    pub fn classify_outcome(&self, outcome: &Result<IndicatorSnapshot, Exclusion>) -> SignalType {
        match outcome {
            Ok(snapshot) => self.classify(snapshot),
            Err(_) => SignalType::None,
        }
    }

    fn is_buy(&self, s: &IndicatorSnapshot) -> bool {
        s.macd_line > s.macd_signal
            && s.rsi_short > s.rsi_long
            && s.rsi_long <= self.buy_rsi_long_ceiling
    }

    fn is_sell(&self, s: &IndicatorSnapshot) -> bool {
        s.macd_line < s.macd_signal
            && s.rsi_short < s.rsi_long
            && s.rsi_long >= self.sell_rsi_long_floor
    }
}

impl Default for SignalClassifier {
    fn default() -> Self {
        Self::new(&SignalSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snapshot(macd_line: f64, macd_signal: f64, rsi_short: f64, rsi_long: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            ticker: "7203".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            close: 100.0,
            sma_short: 100.0,
            sma_long: 100.0,
            rsi_short,
            rsi_long,
            macd_line,
            macd_signal,
            macd_histogram: macd_line - macd_signal,
        }
    }

    #[test]
    fn test_buy_scenario() {
        let classifier = SignalClassifier::default();
        assert_eq!(classifier.classify(&snapshot(1.5, 1.0, 70.0, 35.0)), SignalType::Buy);
    }

    #[test]
    fn test_long_rsi_above_ceiling_is_none() {
        let classifier = SignalClassifier::default();
        assert_eq!(classifier.classify(&snapshot(1.5, 1.0, 70.0, 45.0)), SignalType::None);
    }

    #[test]
    fn test_sell_scenario() {
        let classifier = SignalClassifier::default();
        assert_eq!(classifier.classify(&snapshot(-0.5, 0.2, 55.0, 72.0)), SignalType::Sell);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let classifier = SignalClassifier::default();
        assert_eq!(classifier.classify(&snapshot(1.0, 0.0, 41.0, 40.0)), SignalType::Buy);
        assert_eq!(classifier.classify(&snapshot(0.0, 1.0, 59.0, 60.0)), SignalType::Sell);
        assert_eq!(classifier.classify(&snapshot(1.0, 0.0, 41.0, 40.0001)), SignalType::None);
        assert_eq!(classifier.classify(&snapshot(0.0, 1.0, 59.0, 59.9999)), SignalType::None);
    }

    #[test]
    fn test_equal_macd_is_none() {
        let classifier = SignalClassifier::default();
        assert_eq!(classifier.classify(&snapshot(1.0, 1.0, 70.0, 35.0)), SignalType::None);
        assert_eq!(classifier.classify(&snapshot(1.0, 1.0, 30.0, 65.0)), SignalType::None);
    }

    #[test]
    fn test_equal_rsi_is_none() {
        let classifier = SignalClassifier::default();
        assert_eq!(classifier.classify(&snapshot(2.0, 1.0, 35.0, 35.0)), SignalType::None);
        assert_eq!(classifier.classify(&snapshot(1.0, 2.0, 65.0, 65.0)), SignalType::None);
    }

    #[test]
    fn test_flipping_macd_sign() {
        let classifier = SignalClassifier::default();

        // Buy-side RSI conditions: positive spread buys, negative spread does nothing
        assert_eq!(classifier.classify(&snapshot(2.0, 1.0, 50.0, 30.0)), SignalType::Buy);
        assert_eq!(classifier.classify(&snapshot(1.0, 2.0, 50.0, 30.0)), SignalType::None);

        // Sell-side RSI conditions: negative spread sells, positive spread does nothing
        assert_eq!(classifier.classify(&snapshot(1.0, 2.0, 50.0, 70.0)), SignalType::Sell);
        assert_eq!(classifier.classify(&snapshot(2.0, 1.0, 50.0, 70.0)), SignalType::None);
    }

    #[test]
    fn test_buy_and_sell_never_both() {
        let classifier = SignalClassifier::default();
        let values = [-5.0, -1.0, 0.0, 1.0, 5.0];
        let rsis = [0.0, 20.0, 40.0, 50.0, 60.0, 80.0, 100.0];

        for &line in &values {
            for &signal in &values {
                for &rsi_short in &rsis {
                    for &rsi_long in &rsis {
                        let s = snapshot(line, signal, rsi_short, rsi_long);
                        assert!(!(classifier.is_buy(&s) && classifier.is_sell(&s)));
                    }
                }
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = SignalClassifier::new(&SignalSettings {
            buy_rsi_long_ceiling: 30.0,
            sell_rsi_long_floor: 70.0,
        });
        assert_eq!(classifier.classify(&snapshot(1.5, 1.0, 70.0, 35.0)), SignalType::None);
        assert_eq!(classifier.classify(&snapshot(1.5, 1.0, 70.0, 25.0)), SignalType::Buy);
    }

    #[test]
    fn test_excluded_outcome_is_none() {
        let classifier = SignalClassifier::default();
        let outcome = Err(Exclusion::insufficient_history("4385", 35, 10));
        assert_eq!(classifier.classify_outcome(&outcome), SignalType::None);

        let outcome = Ok(snapshot(1.5, 1.0, 70.0, 35.0));
        assert_eq!(classifier.classify_outcome(&outcome), SignalType::Buy);
    }
}
