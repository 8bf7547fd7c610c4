/// Core data types for the rainfall erosivity pipeline.
///
/// This module defines the shared domain model imported by all other
/// modules, plus the physical constants of the EI30 method. It contains
/// no logic, no I/O, and no external dependencies beyond chrono — only
/// types and named numbers.
///
/// Formulas follow Panagos et al. (2015) and Verstraeten et al. (2006),
/// the same references the VMM 10-minute rain gauge processing uses.

use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

/// Dry-period window used for storm separation, in seconds (6 hours).
/// A storm ends once the trailing 6-hour depth total drops to zero.
pub const DRY_PERIOD_SECONDS: f64 = 21_600.0;

/// Maximum-intensity window, in seconds (30 minutes).
pub const I30_WINDOW_SECONDS: f64 = 1_800.0;

/// Minimum total storm depth for a storm to count as erosive, in mm.
/// Comparison is strict: a storm totalling exactly 1.27 mm is dropped.
pub const EROSIVE_DEPTH_THRESHOLD_MM: f64 = 1.27;

/// Coefficient of the unit rainfall energy relation e = 11.12 · i^0.31,
/// in MJ·ha⁻¹·mm⁻¹ (Verstraeten et al., 2006).
pub const UNIT_ENERGY_COEFFICIENT: f64 = 11.12;

/// Exponent of the unit rainfall energy relation.
pub const UNIT_ENERGY_EXPONENT: f64 = 0.31;

/// Divisor converting summed annual EI30 from J·m⁻² to MJ·ha⁻¹.
pub const ANNUAL_UNIT_DIVISOR: f64 = 100.0;

// ---------------------------------------------------------------------------
// Series types
// ---------------------------------------------------------------------------

/// A single fixed-interval precipitation sample.
///
/// Produced by `ingest::series` from one data row of the input table.
/// `intensity_mm_per_h` is derived at load time as
/// `depth_mm / Δt_seconds * 3600`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRecord {
    pub timestamp: NaiveDateTime,
    pub depth_mm: f64,
    pub intensity_mm_per_h: f64,
}

/// A series record tagged with its storm assignment.
///
/// `series_index` is the record's 0-based position in the *unfiltered*
/// series. It survives the erosive-storm filter so that 30-minute windows
/// are still measured against real elapsed time, not positions in the
/// filtered sequence.
///
/// `storm_id` is 0-based and non-decreasing along the series; every
/// record of the input belongs to exactly one storm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormRecord {
    pub series_index: usize,
    pub storm_id: u32,
    pub timestamp: NaiveDateTime,
    pub depth_mm: f64,
    pub intensity_mm_per_h: f64,
}

// ---------------------------------------------------------------------------
// Aggregate types
// ---------------------------------------------------------------------------

/// Maximum 30-minute intensity of one storm, in mm/h.
///
/// One row per storm that has at least one record with a defined
/// 30-minute window (i.e. `series_index >= span`). A storm with no such
/// record gets no row here and is thereby excluded from all downstream
/// tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormIntensity {
    pub storm_id: u32,
    pub i30_mm_per_h: f64,
}

/// Erosivity of one storm within one calendar year.
///
/// A storm spanning a year boundary contributes one row per year, each
/// with its own energy sum but the shared storm I30.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormErosivity {
    pub year: i32,
    pub storm_id: u32,
    /// Σ (unit_energy · depth) over the group's records, in MJ·ha⁻¹.
    pub ervr: f64,
    pub i30_mm_per_h: f64,
    /// Latest record timestamp in the group.
    pub end_time: NaiveDateTime,
    /// `ervr · i30`.
    pub ei30: f64,
}

/// Annual R-factor, in MJ·ha⁻¹·mm·h⁻¹·yr⁻¹.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualErosivity {
    pub year: i32,
    pub r_factor: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when loading or processing a precipitation series.
///
/// All variants are fatal: they abort the run before any output is
/// written. An input whose storms are all filtered out is *not* an error —
/// every stage tolerates an empty series and produces empty tables.
#[derive(Debug, PartialEq)]
pub enum ErosivityError {
    /// A malformed input table: missing columns, unparseable timestamp,
    /// non-numeric or negative depth, out-of-order rows. `row` is the
    /// 1-based line number in the input file where known.
    InputFormat { row: usize, message: String },
    /// Fewer than 2 records — the sampling interval Δt cannot be derived.
    InsufficientData(usize),
    /// File read or write failure, with the offending path in the message.
    Io(String),
}

impl std::fmt::Display for ErosivityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErosivityError::InputFormat { row, message } => {
                write!(f, "Input format error at row {}: {}", row, message)
            }
            ErosivityError::InsufficientData(n) => {
                write!(
                    f,
                    "Insufficient data: {} record(s), need at least 2 to derive the sampling interval",
                    n
                )
            }
            ErosivityError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ErosivityError {}
