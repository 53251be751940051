mod price_table;
mod scan_config;
mod signal;

pub use price_table::{CloseSeries, PriceTable};
pub use scan_config::ScanConfig;
pub use signal::{Signal, SignalRecord};
