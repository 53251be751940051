use chrono::Utc;
use std::path::PathBuf;

use crate::constants::TIMESTAMP_FORMAT;
use crate::error::Error;
use crate::models::{PriceTable, ScanConfig};
use crate::services::yahoo::{YahooClient, YahooError};
use crate::services::{build_snapshot, preview, write_snapshot};

pub fn run(
    start_date: String,
    end_date: Option<String>,
    lookback: usize,
    threshold: f64,
    adjusted: bool,
    output_dir: Option<PathBuf>,
) {
    let config = ScanConfig {
        start_date,
        end_date,
        lookback,
        drop_threshold: threshold,
        use_adjusted: adjusted,
        ..ScanConfig::default()
    };
    let config = match output_dir {
        Some(dir) => ScanConfig { output_dir: dir, ..config },
        None => config,
    };

    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    match run_scan(config) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("\n❌ Scan failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_scan(config: ScanConfig) -> Result<(), Error> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Network(format!("Failed to create runtime: {}", e)))?;

    let prices = runtime.block_on(fetch_prices(&config))?;

    let generated_at = Utc::now().format(TIMESTAMP_FORMAT).to_string();
    let records = build_snapshot(&prices, &config, &generated_at);

    let (csv_path, json_path) = write_snapshot(&records, &config.output_dir)?;

    println!("\n=== Scan snapshot ===");
    preview(&records, 5);
    println!(
        "\nSaved results to:\n - {}\n - {}",
        csv_path.display(),
        json_path.display()
    );

    Ok(())
}

/// Fetch daily closes for every configured ticker, one request at a time.
///
/// A ticker the provider has nothing for is dropped with a warning; the run
/// only fails when no ticker returns any data.
async fn fetch_prices(config: &ScanConfig) -> Result<PriceTable, Error> {
    println!("📡 Fetching data from Yahoo Finance...");

    let client = YahooClient::new(true)?;
    let mut series = Vec::new();

    for ticker in &config.tickers {
        let result = client
            .get_daily_history(
                ticker,
                &config.start_date,
                config.end_date.as_deref(),
                config.use_adjusted,
            )
            .await;

        match result {
            Ok(bars) if !bars.is_empty() => {
                tracing::debug!("FETCH_OK: ticker={}, bars={}", ticker, bars.len());
                let closes = bars.into_iter().map(|b| (b.date, b.close)).collect();
                series.push((ticker.clone(), closes));
            }
            Ok(_) | Err(YahooError::NoData) => {
                eprintln!("⚠️  No data for {}, skipping", ticker);
            }
            Err(e) => {
                eprintln!("⚠️  Fetch failed for {}: {}", ticker, e);
            }
        }
    }

    if series.is_empty() {
        return Err(Error::NoData(
            "no provider data for any configured ticker".to_string(),
        ));
    }

    println!("✅ Got data for {}/{} tickers", series.len(), config.tickers.len());

    Ok(PriceTable::from_series(series))
}
