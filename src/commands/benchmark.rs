use chrono::Utc;
use serde::Serialize;
use std::fs;

use crate::constants::{BENCHMARK_JSON_FILENAME, BENCHMARK_SYMBOLS, TIMESTAMP_FORMAT};
use crate::error::Error;
use crate::services::yahoo::{DailyBar, YahooClient};
use crate::utils::get_output_dir;

#[derive(Debug, Serialize)]
struct BenchmarkPoint {
    t: String,
    close: f64,
}

#[derive(Debug, Serialize)]
struct BenchmarkSeries {
    ticker: String,
    as_of: String,
    rows: Vec<BenchmarkPoint>,
}

pub fn run() {
    match run_benchmark() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("\n❌ Benchmark fetch failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Fetch one year of daily closes for the OSEBX index and write it as JSON.
///
/// The index trades under `^OSEBX` on Yahoo; `^OSEAX` is the fallback when
/// the primary symbol yields nothing.
fn run_benchmark() -> Result<(), Error> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Network(format!("Failed to create runtime: {}", e)))?;

    let (symbol, bars) = runtime.block_on(fetch_index())?;

    let series = BenchmarkSeries {
        ticker: symbol.clone(),
        as_of: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
        rows: bars
            .into_iter()
            .map(|b| BenchmarkPoint {
                t: b.date.format("%Y-%m-%d").to_string(),
                close: b.close,
            })
            .collect(),
    };

    let output_dir = get_output_dir();
    fs::create_dir_all(&output_dir)?;
    let json_path = output_dir.join(BENCHMARK_JSON_FILENAME);
    fs::write(&json_path, serde_json::to_string(&series)?)?;

    println!(
        "Wrote {} with {} points (source: {})",
        json_path.display(),
        series.rows.len(),
        symbol
    );

    Ok(())
}

async fn fetch_index() -> Result<(String, Vec<DailyBar>), Error> {
    let client = YahooClient::new(true)?;
    let mut last_error: Option<Error> = None;

    for symbol in BENCHMARK_SYMBOLS {
        println!("📡 Fetching {} (1y daily)...", symbol);
        match client.get_range_history(symbol, "1y", false).await {
            Ok(bars) if !bars.is_empty() => return Ok((symbol.to_string(), bars)),
            Ok(_) => {
                eprintln!("⚠️  {} returned no bars, trying fallback", symbol);
                last_error = Some(Error::NoData(format!("{} returned no bars", symbol)));
            }
            Err(e) => {
                eprintln!("⚠️  {} failed: {}, trying fallback", symbol, e);
                last_error = Some(e.into());
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| Error::NoData("no benchmark symbols configured".to_string())))
}
