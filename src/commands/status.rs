use crate::constants::SCAN_CSV_FILENAME;
use crate::models::{Signal, SignalRecord};
use crate::utils::get_output_dir;

pub fn run() {
    println!("📊 Scan Status\n");

    match show_status() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_status() -> Result<(), Box<dyn std::error::Error>> {
    let csv_path = get_output_dir().join(SCAN_CSV_FILENAME);

    if !csv_path.is_file() {
        println!("⚠️  No snapshot found at {}. Run 'scan' first.", csv_path.display());
        return Ok(());
    }

    let mut reader = csv::Reader::from_path(&csv_path)?;
    let records: Vec<SignalRecord> = reader.deserialize().collect::<Result<_, _>>()?;

    if records.is_empty() {
        println!("⚠️  Snapshot at {} is empty.", csv_path.display());
        return Ok(());
    }

    let buys: Vec<&SignalRecord> = records
        .iter()
        .filter(|r| r.signal == Signal::Buy)
        .collect();

    println!("📈 Tickers: {}   BUY: {}   HOLD: {}", records.len(), buys.len(), records.len() - buys.len());
    println!("🕒 Generated: {}\n", records[0].date);

    if buys.is_empty() {
        println!("No BUY signals in the latest snapshot.");
    } else {
        println!("🔹 BUY signals:");
        for record in buys {
            let ret = record
                .lookback_return
                .map(|r| format!("{:+.2}%", r * 100.0))
                .unwrap_or_else(|| "-".to_string());
            let price = record
                .last_price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string());
            println!("   {:<10} {:>8}  last {}", record.ticker, ret, price);
        }
    }

    Ok(())
}
