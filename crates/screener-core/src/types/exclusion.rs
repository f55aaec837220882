//! Reasons a ticker is left out of classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a ticker produced no snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Fewer bars than the longest lookback requires
    InsufficientHistory { required: usize, available: usize },
    /// Out-of-order dates or non-numeric prices
    MalformedSeries { detail: String },
    /// No series available for the ticker
    NotFound,
}

/// A ticker excluded from the run, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub ticker: String,
    pub reason: ExclusionReason,
}

impl Exclusion {
    pub fn new(ticker: impl Into<String>, reason: ExclusionReason) -> Self {
        Self {
            ticker: ticker.into(),
            reason,
        }
    }

    pub fn insufficient_history(ticker: impl Into<String>, required: usize, available: usize) -> Self {
        Self::new(ticker, ExclusionReason::InsufficientHistory { required, available })
    }

    pub fn malformed(ticker: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(
            ticker,
            ExclusionReason::MalformedSeries {
                detail: detail.into(),
            },
        )
    }

    pub fn not_found(ticker: impl Into<String>) -> Self {
        Self::new(ticker, ExclusionReason::NotFound)
    }

    /// Whether this exclusion only reflects a short history.
    pub fn is_insufficient_history(&self) -> bool {
        matches!(self.reason, ExclusionReason::InsufficientHistory { .. })
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::InsufficientHistory { required, available } => {
                write!(f, "insufficient history: need {} bars, have {}", required, available)
            }
            ExclusionReason::MalformedSeries { detail } => write!(f, "malformed series: {}", detail),
            ExclusionReason::NotFound => write!(f, "no price series"),
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.ticker, self.reason)
    }
}
