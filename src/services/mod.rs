pub mod returns;
pub mod snapshot;
pub mod yahoo;

pub use returns::latest_returns;
pub use snapshot::{build_snapshot, preview, write_snapshot};
pub use yahoo::{DailyBar, YahooClient, YahooError};
