//! Rainfall Erosivity (R-factor) Pipeline - CLI entry point
//!
//! Computes annual rainfall erosivity from a fixed-interval
//! precipitation depth series:
//! 1. Parse the delimited input table, derive Δt and intensity
//! 2. Segment storms on the 6-hour dry-period rule, drop non-erosive ones
//! 3. Compute each storm's maximum 30-minute intensity (I30)
//! 4. Aggregate EI30 per storm and R-factor per year, write the tables
//!
//! Usage:
//!   cargo run --release -- rainfall.csv
//!   cargo run --release -- --config run.toml
//!
//! Options:
//!   --config FILE          Load run parameters from a TOML file
//!   --no-detail            Skip writing the EI30/R CSV tables
//!   --delimiter CHAR       Input field delimiter (default ',')
//!   --timestamp-format FMT chrono format of the timestamp column
//!   --sample-limit N       Process at most N data rows
//!   --results-dir DIR      Output directory (default Results)

use rfactor_pipeline::analysis::erosivity::mean_annual_r;
use rfactor_pipeline::config::{RunConfig, load_config};
use rfactor_pipeline::pipeline;
use std::env;

fn main() {
    println!("🌧  Rainfall Erosivity (R-factor) Pipeline");
    println!("==========================================\n");

    let config = parse_args(env::args().collect());

    println!("📄 Input: {}", config.input_path);
    if let Some(limit) = config.sample_limit {
        println!("   Sample limit: {} rows", limit);
    }

    let run = match pipeline::run(&config) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("\n❌ {}\n", e);
            std::process::exit(1);
        }
    };

    println!("✓ {} qualifying storm row(s), {} year(s)", run.storm_table.len(), run.annual_table.len());
    if config.write_detail {
        let basename = rfactor_pipeline::output::table_basename(&config.input_path);
        println!(
            "✓ Tables written: {}/{}-EI30.csv, {}/{}-R.csv",
            config.results_dir, basename, config.results_dir, basename
        );
    }

    println!();
    for year in &run.annual_table {
        println!("   {}  R = {:.2}", year.year, year.r_factor);
    }

    match mean_annual_r(&run.annual_table) {
        Some(mean) => println!("\nMean annual R-factor: {:.2}", mean),
        None => println!("\nMean annual R-factor: no data (no storm qualified)"),
    }
}

/// Builds the run configuration from command-line arguments, with CLI
/// flags overriding values from an optional `--config` file.
fn parse_args(args: Vec<String>) -> RunConfig {
    let mut config: Option<RunConfig> = None;
    let mut input_path: Option<String> = None;
    let mut write_detail: Option<bool> = None;
    let mut delimiter: Option<char> = None;
    let mut timestamp_format: Option<String> = None;
    let mut sample_limit: Option<usize> = None;
    let mut results_dir: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                config = Some(load_config(required_value(&args, i, "--config")));
                i += 2;
            }
            "--no-detail" => {
                write_detail = Some(false);
                i += 1;
            }
            "--delimiter" => {
                let value = required_value(&args, i, "--delimiter");
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => delimiter = Some(c),
                    _ => usage_error(&args[0], &format!("--delimiter takes a single character, got '{}'", value)),
                }
                i += 2;
            }
            "--timestamp-format" => {
                timestamp_format = Some(required_value(&args, i, "--timestamp-format").to_string());
                i += 2;
            }
            "--sample-limit" => {
                let value = required_value(&args, i, "--sample-limit");
                match value.parse() {
                    Ok(n) => sample_limit = Some(n),
                    Err(_) => usage_error(&args[0], &format!("--sample-limit takes a number, got '{}'", value)),
                }
                i += 2;
            }
            "--results-dir" => {
                results_dir = Some(required_value(&args, i, "--results-dir").to_string());
                i += 2;
            }
            other if other.starts_with("--") => {
                usage_error(&args[0], &format!("Unknown argument: {}", other));
            }
            positional => {
                if input_path.is_some() {
                    usage_error(&args[0], &format!("Unexpected extra argument: {}", positional));
                }
                input_path = Some(positional.to_string());
                i += 1;
            }
        }
    }

    let mut config = match (config, input_path) {
        (Some(mut c), maybe_input) => {
            if let Some(input) = maybe_input {
                c.input_path = input;
            }
            c
        }
        (None, Some(input)) => RunConfig::new(&input),
        (None, None) => {
            usage_error(&args[0], "An input file (or --config FILE) is required");
        }
    };

    if let Some(v) = write_detail {
        config.write_detail = v;
    }
    if let Some(v) = delimiter {
        config.delimiter = v;
    }
    if let Some(v) = timestamp_format {
        config.timestamp_format = v;
    }
    if let Some(v) = sample_limit {
        config.sample_limit = Some(v);
    }
    if let Some(v) = results_dir {
        config.results_dir = v;
    }

    config
}

fn required_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i + 1) {
        Some(value) => value,
        None => usage_error(&args[0], &format!("{} requires a value", flag)),
    }
}

fn usage_error(program: &str, message: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!(
        "Usage: {} [--config FILE] [--no-detail] [--delimiter CHAR] \
         [--timestamp-format FMT] [--sample-limit N] [--results-dir DIR] INPUT.csv",
        program
    );
    std::process::exit(1);
}
