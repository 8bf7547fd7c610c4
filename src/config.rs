/// Run configuration loader - parses an optional TOML config file
///
/// Separates run parameters from code, so a gauge archive's export quirks
/// (delimiter, timestamp format, results directory) can be pinned in a
/// small file without recompiling. Every field except `input_path` has a
/// default matching the common case (comma-delimited, ISO-like
/// timestamps, full detail output into `Results/`).

use serde::Deserialize;
use std::fs;

/// Parameters for one pipeline run.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Path of the delimited input file (header `timestamp,value`).
    pub input_path: String,

    /// Write the per-storm EI30 table and the annual R table to CSV.
    /// The annual table is returned programmatically either way.
    #[serde(default = "default_write_detail")]
    pub write_detail: bool,

    /// Field delimiter of the input file.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// chrono format string for the input `timestamp` column.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Optional cap on the number of data rows processed, for fast
    /// iteration on multi-decade gauge archives.
    #[serde(default)]
    pub sample_limit: Option<usize>,

    /// Directory the output tables are written into; created if absent.
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

fn default_write_detail() -> bool {
    true
}

fn default_delimiter() -> char {
    ','
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M:%S".to_string()
}

fn default_results_dir() -> String {
    "Results".to_string()
}

impl RunConfig {
    /// Configuration with all defaults for the given input file.
    pub fn new(input_path: &str) -> Self {
        Self {
            input_path: input_path.to_string(),
            write_detail: default_write_detail(),
            delimiter: default_delimiter(),
            timestamp_format: default_timestamp_format(),
            sample_limit: None,
            results_dir: default_results_dir(),
        }
    }
}

/// Loads a run configuration from a TOML file.
///
/// # Panics
/// Panics if the file is missing or malformed. This is intentional — a
/// run with a broken configuration should stop at startup, not produce
/// tables computed under the wrong delimiter or timestamp format.
pub fn load_config(path: &str) -> RunConfig {
    let contents = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path, e));

    toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}
