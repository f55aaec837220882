//! Technical indicators for end-of-day screening.
//!
//! This crate provides batch implementations of the indicators the
//! screener classifies on:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI with Wilder smoothing, MACD)
//!
//! Every indicator only emits values for positions with a complete
//! lookback window.

pub mod momentum;
pub mod moving_average;

pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, MovingAverage, MovingAverageKind, Sma};
