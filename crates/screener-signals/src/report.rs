//! Screening run report.

use serde::Serialize;
use std::collections::HashMap;
use screener_core::types::{Exclusion, ExclusionReason};

use crate::ResultSet;

/// Everything a screening run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScreeningReport {
    /// Tickers in the universe
    pub evaluated: usize,
    /// Tickers with a snapshot but no signal
    pub neutral: usize,
    pub buy: ResultSet,
    pub sell: ResultSet,
    /// Tickers without a snapshot, ascending by ticker
    pub excluded: Vec<Exclusion>,
}

impl ScreeningReport {
    /// Replace generic not-found exclusions with the reason the fetch
    /// stage recorded for the same ticker.
    pub fn with_upstream(mut self, upstream: Vec<Exclusion>) -> Self {
        let upstream: HashMap<String, ExclusionReason> = upstream
            .into_iter()
            .map(|e| (e.ticker, e.reason))
            .collect();

        for exclusion in &mut self.excluded {
            if exclusion.reason == ExclusionReason::NotFound {
                if let Some(reason) = upstream.get(&exclusion.ticker) {
                    exclusion.reason = reason.clone();
                }
            }
        }
        self
    }

    /// Tickers that got a snapshot.
    pub fn classified(&self) -> usize {
        self.buy.len() + self.sell.len() + self.neutral
    }

    /// Exclusions caused only by short history.
    pub fn insufficient_history(&self) -> usize {
        self.excluded
            .iter()
            .filter(|e| e.is_insufficient_history())
            .count()
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     SCREENING REPORT                       \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("UNIVERSE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Tickers Evaluated:   {}\n", self.evaluated));
        s.push_str(&format!("  Classified:          {}\n", self.classified()));
        s.push_str(&format!("  Excluded:            {}\n", self.excluded.len()));
        s.push_str(&format!(
            "    Short History:     {}\n",
            self.insufficient_history()
        ));
        s.push('\n');

        s.push_str("SIGNALS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Buy:                 {}\n", self.buy.len()));
        s.push_str(&format!("  Sell:                {}\n", self.sell.len()));
        s.push_str(&format!("  Neutral:             {}\n", self.neutral));
        s.push('\n');

        if !self.buy.is_empty() {
            s.push_str(&format!("  BUY:  {}\n", self.buy.tickers().join(", ")));
        }
        if !self.sell.is_empty() {
            s.push_str(&format!("  SELL: {}\n", self.sell.tickers().join(", ")));
        }
        if !self.buy.is_empty() || !self.sell.is_empty() {
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
