//! Moving average indicators.

use serde::{Deserialize, Serialize};
use screener_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "SMA"
    }

    fn latest(&self, data: &[f64]) -> Option<f64> {
        self.validate_data(data).ok()?;
        let window = &data[data.len() - self.period..];
        Some(window.iter().sum::<f64>() / self.period as f64)
    }
}

/// Exponential Moving Average (EMA).
///
/// Seeded with the SMA of the first `period` values, then smoothed with
/// `alpha = 2 / (period + 1)`.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        // Initialize with SMA
        let initial_sma: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
        result.push(initial_sma);

        let mut ema = initial_sma;
        let one_minus_mult = 1.0 - self.multiplier;

        for &price in &data[self.period..] {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// Which moving average backs the short/long trend values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MovingAverageKind {
    #[default]
    Simple,
    Exponential,
}

/// Moving average of either kind behind one indicator interface.
#[derive(Debug, Clone)]
pub enum MovingAverage {
    Simple(Sma),
    Exponential(Ema),
}

impl MovingAverage {
    /// Create a moving average of the given kind and period.
    pub fn new(kind: MovingAverageKind, period: usize) -> Self {
        match kind {
            MovingAverageKind::Simple => MovingAverage::Simple(Sma::new(period)),
            MovingAverageKind::Exponential => MovingAverage::Exponential(Ema::new(period)),
        }
    }
}

impl Indicator for MovingAverage {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        match self {
            MovingAverage::Simple(sma) => sma.calculate(data),
            MovingAverage::Exponential(ema) => ema.calculate(data),
        }
    }

    fn period(&self) -> usize {
        match self {
            MovingAverage::Simple(sma) => sma.period(),
            MovingAverage::Exponential(ema) => ema.period(),
        }
    }

    fn name(&self) -> &str {
        match self {
            MovingAverage::Simple(sma) => sma.name(),
            MovingAverage::Exponential(ema) => ema.name(),
        }
    }

    fn latest(&self, data: &[f64]) -> Option<f64> {
        match self {
            MovingAverage::Simple(sma) => sma.latest(data),
            MovingAverage::Exponential(ema) => ema.latest(data),
        }
    }
}
