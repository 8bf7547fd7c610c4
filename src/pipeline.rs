/// Stage orchestration: load → segment → I30 → aggregate → write.
///
/// Each stage takes the previous stage's output by value or reference
/// and returns a fresh table; nothing is mutated across stages and no
/// state outlives a run, so processing several files in one process is
/// re-entrant by construction.

use crate::analysis::{erosivity, intensity, storms};
use crate::config::RunConfig;
use crate::ingest::series;
use crate::model::{AnnualErosivity, ErosivityError, StormErosivity};
use crate::output;

/// Result of one pipeline run. The annual table is the primary result;
/// the per-storm table backs the detail output and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ErosivityRun {
    pub storm_table: Vec<StormErosivity>,
    pub annual_table: Vec<AnnualErosivity>,
}

/// Runs the full erosivity pipeline for one input file.
///
/// Fatal errors (unreadable input, format violations, too few records)
/// abort before anything is written. An input whose storms are all
/// filtered out is not an error: the tables come back empty and, when
/// detail output is enabled, header-only files are still written.
pub fn run(config: &RunConfig) -> Result<ErosivityRun, ErosivityError> {
    let (records, dt_seconds) = series::load_series(config)?;

    let tagged = storms::segment_storms(&records, dt_seconds);
    let erosive = storms::filter_erosive(tagged);
    let intensities = intensity::compute_i30(&erosive, dt_seconds);
    let storm_table = erosivity::aggregate_storms(&erosive, &intensities);
    let annual_table = erosivity::aggregate_annual(&storm_table);

    if config.write_detail {
        output::ensure_results_dir(&config.results_dir)?;
        let basename = output::table_basename(&config.input_path);
        output::write_storm_table(
            &output::storm_table_path(&config.results_dir, &basename),
            &storm_table,
        )?;
        output::write_annual_table(
            &output::annual_table_path(&config.results_dir, &basename),
            &annual_table,
        )?;
    }

    Ok(ErosivityRun {
        storm_table,
        annual_table,
    })
}
