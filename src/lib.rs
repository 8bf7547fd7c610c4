/// rfactor_pipeline: rainfall erosivity (R-factor, EI30) computation
/// from fixed-interval rain gauge depth series.
///
/// # Module structure
///
/// ```text
/// rfactor_pipeline
/// ├── model       — shared data types, physical constants, ErosivityError
/// ├── config      — run configuration (TOML file + defaults)
/// ├── ingest
/// │   ├── series  — delimited input parsing, Δt derivation, intensity
/// │   └── fixtures (test only) — representative table payloads + builder
/// ├── analysis
/// │   ├── rolling   — incremental trailing-window sums
/// │   ├── storms    — 6-hour dry-period segmentation, erosive filter
/// │   ├── intensity — per-storm maximum 30-minute intensity (I30)
/// │   └── erosivity — EI30 per storm, annual R-factor
/// ├── output      — results directory + CSV table writers
/// └── pipeline    — stage orchestration for one run
/// ```

/// Public modules
pub mod analysis;
pub mod config;
pub mod ingest;
pub mod model;
pub mod output;
pub mod pipeline;
