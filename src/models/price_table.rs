use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Close prices for a single ticker, ascending by trading day.
pub type CloseSeries = Vec<(NaiveDate, f64)>;

/// Daily close prices, date rows x ticker columns.
///
/// Rows are the union of the per-ticker trading days, ascending. A cell is
/// `None` when that ticker had no close on that day, so a session only
/// exists as a row if at least one ticker traded on it. The same shape holds
/// return values after [`PriceTable::pct_change`].
#[derive(Debug, Clone)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    tickers: Vec<String>,
    /// Row-major: `values[row][col]`, one column per ticker.
    values: Vec<Vec<Option<f64>>>,
}

impl PriceTable {
    /// Build a table from per-ticker close series, keeping ticker order.
    pub fn from_series(series: Vec<(String, CloseSeries)>) -> Self {
        let mut date_index: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for (_, closes) in &series {
            for (date, _) in closes {
                let next = date_index.len();
                date_index.entry(*date).or_insert(next);
            }
        }
        // BTreeMap iteration is ascending; re-number so row order matches.
        let dates: Vec<NaiveDate> = date_index.keys().copied().collect();
        for (row, (_, idx)) in date_index.iter_mut().enumerate() {
            *idx = row;
        }

        let tickers: Vec<String> = series.iter().map(|(t, _)| t.clone()).collect();
        let mut values = vec![vec![None; tickers.len()]; dates.len()];
        for (col, (_, closes)) in series.iter().enumerate() {
            for (date, close) in closes {
                let row = date_index[date];
                values[row][col] = Some(*close);
            }
        }

        Self { dates, tickers, values }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.tickers.is_empty()
    }

    pub fn num_rows(&self) -> usize {
        self.dates.len()
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Windowed percentage change over `periods` trading rows.
    ///
    /// Returns a same-shape table where cell `[i][t]` is
    /// `price[i][t] / price[i - periods][t] - 1`, and `None` for the first
    /// `periods` rows or wherever either endpoint is missing. Missing cells
    /// are not forward-filled.
    pub fn pct_change(&self, periods: usize) -> PriceTable {
        let mut values = vec![vec![None; self.tickers.len()]; self.dates.len()];
        for row in periods..self.dates.len() {
            for col in 0..self.tickers.len() {
                if let (Some(now), Some(then)) =
                    (self.values[row][col], self.values[row - periods][col])
                {
                    values[row][col] = Some(now / then - 1.0);
                }
            }
        }
        PriceTable {
            dates: self.dates.clone(),
            tickers: self.tickers.clone(),
            values,
        }
    }

    /// The most recent row, one cell per ticker. Empty when the table is.
    pub fn last_row(&self) -> Vec<Option<f64>> {
        self.values.last().cloned().unwrap_or_default()
    }

    /// Last non-missing value in a ticker's column.
    pub fn latest_close(&self, ticker: &str) -> Option<f64> {
        let col = self.tickers.iter().position(|t| t == ticker)?;
        self.values.iter().rev().find_map(|row| row[col])
    }
}
