use serde::{Deserialize, Serialize};
use std::fmt;

/// BUY/HOLD classification for one ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Hold,
}

impl Signal {
    /// BUY when the lookback return is defined and at or below the
    /// threshold. An undefined return (insufficient history) never buys.
    pub fn classify(lookback_return: Option<f64>, threshold: f64) -> Self {
        match lookback_return {
            Some(r) if r <= threshold => Signal::Buy,
            _ => Signal::Hold,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// One row of the published snapshot.
///
/// Field names on the wire are fixed (`Ticker,3D_Return,Signal,LastPrice,Date`)
/// and shared between the CSV header and the JSON object keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRecord {
    #[serde(rename = "Ticker")]
    pub ticker: String,

    /// Latest lookback return; absent when history is shorter than the window.
    #[serde(rename = "3D_Return")]
    pub lookback_return: Option<f64>,

    #[serde(rename = "Signal")]
    pub signal: Signal,

    /// Last non-missing close for the ticker, rounded to 6 decimals.
    #[serde(rename = "LastPrice")]
    pub last_price: Option<f64>,

    /// Shared generation timestamp, "YYYY-MM-DD HH:MM UTC".
    #[serde(rename = "Date")]
    pub date: String,
}
