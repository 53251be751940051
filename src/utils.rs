use std::path::PathBuf;

/// Get output directory from environment variable or use default
pub fn get_output_dir() -> PathBuf {
    std::env::var("SCAN_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public/data"))
}
