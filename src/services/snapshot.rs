use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{SCAN_CSV_FILENAME, SCAN_JSON_FILENAME};
use crate::error::{AppError, Result};
use crate::models::{PriceTable, ScanConfig, Signal, SignalRecord};
use crate::services::returns::latest_returns;

/// Build the per-ticker snapshot in ascending-return order.
///
/// `generated_at` is stamped onto every record so one run shares a single
/// timestamp; callers format it once with [`crate::constants::TIMESTAMP_FORMAT`].
pub fn build_snapshot(
    prices: &PriceTable,
    config: &ScanConfig,
    generated_at: &str,
) -> Vec<SignalRecord> {
    latest_returns(prices, config.lookback)
        .into_iter()
        .map(|(ticker, lookback_return)| {
            let signal = Signal::classify(lookback_return, config.drop_threshold);
            let last_price = prices.latest_close(&ticker).map(round6);
            SignalRecord {
                ticker,
                lookback_return,
                signal,
                last_price,
                date: generated_at.to_string(),
            }
        })
        .collect()
}

/// Write the CSV and JSON snapshots, creating the output directory when
/// absent. Both files are fully overwritten. Returns the written paths.
pub fn write_snapshot(records: &[SignalRecord], output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir).map_err(|e| {
        AppError::Io(format!(
            "Failed to create output directory {}: {}",
            output_dir.display(),
            e
        ))
    })?;

    let csv_path = output_dir.join(SCAN_CSV_FILENAME);
    let json_path = output_dir.join(SCAN_JSON_FILENAME);

    let mut writer = csv::Writer::from_path(&csv_path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    // serde_json's pretty printer uses the required 2-space indent.
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&json_path, json)
        .map_err(|e| AppError::Io(format!("Failed to write {}: {}", json_path.display(), e)))?;

    tracing::debug!(
        "SNAPSHOT_WRITE: records={}, csv={}, json={}",
        records.len(),
        csv_path.display(),
        json_path.display()
    );

    Ok((csv_path, json_path))
}

/// Print the head of the snapshot table to the console.
pub fn preview(records: &[SignalRecord], limit: usize) {
    println!("{:<10} {:>10} {:>7} {:>10}  {}", "Ticker", "3D_Return", "Signal", "LastPrice", "Date");
    for record in records.iter().take(limit) {
        let ret = record
            .lookback_return
            .map(|r| format!("{:.4}", r))
            .unwrap_or_else(|| "-".to_string());
        let price = record
            .last_price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:>10} {:>7} {:>10}  {}",
            record.ticker, ret, record.signal, price, record.date
        );
    }
    if records.len() > limit {
        println!("... and {} more", records.len() - limit);
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
