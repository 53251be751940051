use thiserror::Error as ThisError;

use crate::services::yahoo::YahooError;

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No price data: {0}")]
    NoData(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Io(format!("CSV error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(format!("JSON error: {}", err))
    }
}

impl From<YahooError> for AppError {
    fn from(err: YahooError) -> Self {
        match err {
            YahooError::Http(e) => AppError::Network(e.to_string()),
            YahooError::Serialization(e) => AppError::Parse(e.to_string()),
            YahooError::InvalidResponse(s) => AppError::Parse(s),
            YahooError::NoData => AppError::NoData("provider returned an empty result".to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Alias for convenience
pub type Error = AppError;
