use std::cmp::Ordering;

use crate::models::PriceTable;

/// Latest windowed return per ticker, ascending by value.
///
/// Takes the last row of the `lookback`-row percentage-change table and
/// sorts it most-negative first. Undefined returns (history shorter than
/// the window, or a missing endpoint) sort after every defined value. The
/// sort is stable, so ties and the undefined tail keep fetch order.
pub fn latest_returns(prices: &PriceTable, lookback: usize) -> Vec<(String, Option<f64>)> {
    let last_row = prices.pct_change(lookback).last_row();

    let mut returns: Vec<(String, Option<f64>)> = prices
        .tickers()
        .iter()
        .cloned()
        .zip(last_row)
        .collect();

    returns.sort_by(|(_, a), (_, b)| compare_returns(a, b));
    returns
}

fn compare_returns(a: &Option<f64>, b: &Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CloseSeries;
    use chrono::NaiveDate;

    fn series(start_day: u32, closes: &[f64]) -> CloseSeries {
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| {
                (
                    NaiveDate::from_ymd_opt(2024, 5, start_day + i as u32).unwrap(),
                    *c,
                )
            })
            .collect()
    }

    #[test]
    fn test_sorted_ascending_most_negative_first() {
        let table = PriceTable::from_series(vec![
            ("B.OL".to_string(), series(6, &[50.0, 50.0, 50.0, 50.0, 51.0])),
            ("A.OL".to_string(), series(6, &[100.0, 101.0, 99.0, 95.0, 94.0])),
        ]);
        let returns = latest_returns(&table, 3);

        assert_eq!(returns[0].0, "A.OL");
        assert!((returns[0].1.unwrap() - (-0.06)).abs() < 1e-12);
        assert_eq!(returns[1].0, "B.OL");
        assert!((returns[1].1.unwrap() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_sorts_last() {
        let table = PriceTable::from_series(vec![
            ("SHORT.OL".to_string(), series(8, &[10.0, 11.0])),
            ("FULL.OL".to_string(), series(6, &[100.0, 100.0, 100.0, 100.0, 105.0])),
        ]);
        let returns = latest_returns(&table, 3);

        assert_eq!(returns[0].0, "FULL.OL");
        assert!(returns[0].1.is_some());
        assert_eq!(returns[1].0, "SHORT.OL");
        assert_eq!(returns[1].1, None);
    }

    #[test]
    fn test_equal_returns_keep_input_order() {
        let table = PriceTable::from_series(vec![
            ("X.OL".to_string(), series(6, &[10.0, 10.0, 10.0, 10.0, 10.0])),
            ("Y.OL".to_string(), series(6, &[20.0, 20.0, 20.0, 20.0, 20.0])),
        ]);
        let returns = latest_returns(&table, 3);
        assert_eq!(returns[0].0, "X.OL");
        assert_eq!(returns[1].0, "Y.OL");
    }

    #[test]
    fn test_all_undefined_when_history_too_short() {
        let table = PriceTable::from_series(vec![
            ("A.OL".to_string(), series(6, &[10.0, 11.0, 12.0])),
        ]);
        let returns = latest_returns(&table, 3);
        assert_eq!(returns, vec![("A.OL".to_string(), None)]);
    }
}
