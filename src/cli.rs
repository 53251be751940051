use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::constants;

#[derive(Parser)]
#[command(name = "osloscan")]
#[command(about = "Oslo Børs daily dip scanner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch prices and write the BUY/HOLD snapshot
    Scan {
        /// Earliest session to fetch (YYYY-MM-DD)
        #[arg(long, default_value = constants::DEFAULT_START_DATE)]
        start_date: String,

        /// End bound, exclusive (YYYY-MM-DD); omitted = most recent session
        #[arg(long)]
        end_date: Option<String>,

        /// Trading rows the return looks back over
        #[arg(long, default_value_t = constants::DEFAULT_LOOKBACK)]
        lookback: usize,

        /// BUY threshold as a fraction (e.g. -0.03 for -3%)
        #[arg(long, default_value_t = constants::DEFAULT_DROP_THRESHOLD, allow_hyphen_values = true)]
        threshold: f64,

        /// Use dividend/split-adjusted closes
        #[arg(long)]
        adjusted: bool,

        /// Output directory (default: public/data, or SCAN_OUTPUT_DIR)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Show the latest written snapshot
    Status,
    /// Fetch the OSEBX benchmark series
    Benchmark,
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            start_date,
            end_date,
            lookback,
            threshold,
            adjusted,
            output_dir,
        } => {
            commands::scan::run(start_date, end_date, lookback, threshold, adjusted, output_dir);
        }
        Commands::Status => {
            commands::status::run();
        }
        Commands::Benchmark => {
            commands::benchmark::run();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_defaults() {
        let cli = Cli::try_parse_from(["osloscan", "scan"]).unwrap();
        match cli.command {
            Commands::Scan { start_date, lookback, threshold, adjusted, .. } => {
                assert_eq!(start_date, constants::DEFAULT_START_DATE);
                assert_eq!(lookback, constants::DEFAULT_LOOKBACK);
                assert_eq!(threshold, constants::DEFAULT_DROP_THRESHOLD);
                assert!(!adjusted);
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_scan_negative_threshold_flag() {
        let cli = Cli::try_parse_from(["osloscan", "scan", "--threshold", "-0.05"]).unwrap();
        match cli.command {
            Commands::Scan { threshold, .. } => assert_eq!(threshold, -0.05),
            _ => panic!("expected scan"),
        }
    }
}
