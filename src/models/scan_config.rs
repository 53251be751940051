use chrono::NaiveDate;
use std::path::PathBuf;

use crate::constants;
use crate::error::{AppError, Result};
use crate::utils::get_output_dir;

/// Configuration for one scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Ticker universe, Yahoo symbols (e.g. "DNB.OL")
    pub tickers: Vec<String>,

    /// Earliest session to fetch, inclusive ("YYYY-MM-DD")
    pub start_date: String,

    /// End bound, exclusive per provider convention; None = most recent session
    pub end_date: Option<String>,

    /// Trading rows the return looks back over
    pub lookback: usize,

    /// BUY when the lookback return is at or below this fraction
    pub drop_threshold: f64,

    /// Use dividend/split-adjusted closes instead of raw closes
    pub use_adjusted: bool,

    /// Directory the CSV/JSON snapshots are written into
    pub output_dir: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tickers: constants::TICKERS.iter().map(|t| t.to_string()).collect(),
            start_date: constants::DEFAULT_START_DATE.to_string(),
            end_date: None,
            lookback: constants::DEFAULT_LOOKBACK,
            drop_threshold: constants::DEFAULT_DROP_THRESHOLD,
            use_adjusted: false,
            output_dir: get_output_dir(),
        }
    }
}

impl ScanConfig {
    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.tickers.is_empty() {
            return Err(AppError::Config("ticker list is empty".to_string()));
        }
        if self.lookback == 0 {
            return Err(AppError::Config("lookback must be at least 1".to_string()));
        }
        parse_iso_date(&self.start_date)?;
        if let Some(end) = &self.end_date {
            let end_date = parse_iso_date(end)?;
            if end_date <= parse_iso_date(&self.start_date)? {
                return Err(AppError::Config(format!(
                    "end date {} is not after start date {}",
                    end, self.start_date
                )));
            }
        }
        Ok(())
    }
}

fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::Config(format!("invalid date '{}', expected YYYY-MM-DD", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScanConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_tickers_rejected() {
        let config = ScanConfig {
            tickers: Vec::new(),
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let config = ScanConfig {
            lookback: 0,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_date_rejected() {
        let config = ScanConfig {
            start_date: "01/01/2024".to_string(),
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let config = ScanConfig {
            start_date: "2024-06-01".to_string(),
            end_date: Some("2024-01-01".to_string()),
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
