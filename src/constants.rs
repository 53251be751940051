//! Scan defaults and output file layout.
//!
//! The ticker universe is fixed at build time; the `scan` subcommand only
//! overrides dates, window, and threshold via flags.

/// Oslo Børs ticker universe (Yahoo Finance symbols, `.OL` suffix).
pub const TICKERS: &[&str] = &[
    "PROT.OL", "GJF.OL", "STB.OL", "ORK.OL", "EPR.OL", "KID.OL",
    "DNB.OL", "SB1NO.OL", "SBNOR.OL", "MING.OL", "NONG.OL",
    "MORG.OL", "VEI.OL", "AFG.OL",
];

/// Earliest session to fetch (inclusive).
pub const DEFAULT_START_DATE: &str = "2024-01-01";

/// Number of trading rows the return looks back over.
pub const DEFAULT_LOOKBACK: usize = 3;

/// A ticker is a BUY when its lookback return is at or below this fraction.
pub const DEFAULT_DROP_THRESHOLD: f64 = -0.03;

/// Snapshot filenames inside the output directory.
///
/// The column/file names say "3day" because the published export always uses
/// the 3-row return regardless of what `--lookback` is set to; downstream
/// consumers key on these names.
pub const SCAN_CSV_FILENAME: &str = "scan_3day.csv";
pub const SCAN_JSON_FILENAME: &str = "scan_3day.json";

/// Benchmark index symbols, tried in order until one returns data.
pub const BENCHMARK_SYMBOLS: &[&str] = &["^OSEBX", "^OSEAX"];

/// Benchmark series filename inside the output directory.
pub const BENCHMARK_JSON_FILENAME: &str = "osebx.json";

/// Shared run timestamp format, minute precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";
