/// Result table writers.
///
/// Two comma-delimited tables per run, named after the input file:
///
///   <basename>-EI30.csv — one row per qualifying (year, storm) group
///   <basename>-R.csv    — one row per calendar year (the R-factor)
///
/// Empty tables still get header-only files, so downstream tooling can
/// rely on the files existing with a fixed column layout whether or not
/// any storm qualified.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{AnnualErosivity, ErosivityError, StormErosivity};

/// Timestamp format used in the EI30 table.
const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output basename derived from the input path: file name without its
/// extension (`data/ukkel_10min.csv` → `ukkel_10min`).
pub fn table_basename(input_path: &str) -> String {
    Path::new(input_path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string())
}

/// Creates the results directory if it does not exist yet.
pub fn ensure_results_dir(dir: &str) -> Result<(), ErosivityError> {
    fs::create_dir_all(dir).map_err(|e| ErosivityError::Io(format!("{}: {}", dir, e)))
}

/// Path of the per-storm EI30 table.
pub fn storm_table_path(dir: &str, basename: &str) -> PathBuf {
    Path::new(dir).join(format!("{}-EI30.csv", basename))
}

/// Path of the annual R-factor table.
pub fn annual_table_path(dir: &str, basename: &str) -> PathBuf {
    Path::new(dir).join(format!("{}-R.csv", basename))
}

/// Writes the per-storm EI30 table.
pub fn write_storm_table(path: &Path, storms: &[StormErosivity]) -> Result<(), ErosivityError> {
    let mut out = String::from("year,storm_id,ervr,I30,timestamp,EI30\n");
    for storm in storms {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            storm.year,
            storm.storm_id,
            storm.ervr,
            storm.i30_mm_per_h,
            storm.end_time.format(OUTPUT_TIMESTAMP_FORMAT),
            storm.ei30,
        ));
    }
    fs::write(path, out).map_err(|e| ErosivityError::Io(format!("{}: {}", path.display(), e)))
}

/// Writes the annual R-factor table. The `EI30` column holds the final
/// R-factor (after the /100 unit correction), matching the published
/// table layout.
pub fn write_annual_table(path: &Path, annual: &[AnnualErosivity]) -> Result<(), ErosivityError> {
    let mut out = String::from("year,EI30\n");
    for row in annual {
        out.push_str(&format!("{},{}\n", row.year, row.r_factor));
    }
    fs::write(path, out).map_err(|e| ErosivityError::Io(format!("{}: {}", path.display(), e)))
}
