/// EI30 per storm and annual R-factor aggregation.
///
/// Per record, the unit rainfall energy e = 11.12 · i^0.31 (MJ·ha⁻¹·mm⁻¹,
/// Verstraeten et al. 2006) is weighted by the record's depth; per
/// `(year, storm)` group those products are summed and multiplied by the
/// storm's I30 to give EI30. Annual sums of EI30, divided by 100 to
/// convert J·m⁻² to MJ·ha⁻¹, give the R-factor.
///
/// Grouping is by each record's own calendar year, so a storm running
/// across New Year contributes one row per year (each with its own
/// energy sum but the shared storm I30) — the convention of the
/// published method this pipeline reproduces.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDateTime};

use crate::model::{
    ANNUAL_UNIT_DIVISOR, AnnualErosivity, StormErosivity, StormIntensity, StormRecord,
    UNIT_ENERGY_COEFFICIENT, UNIT_ENERGY_EXPONENT,
};

/// Unit rainfall energy for a given intensity, in MJ·ha⁻¹·mm⁻¹.
pub fn unit_energy(intensity_mm_per_h: f64) -> f64 {
    UNIT_ENERGY_COEFFICIENT * intensity_mm_per_h.powf(UNIT_ENERGY_EXPONENT)
}

/// Builds the per-storm EI30 table, ascending by `(year, storm_id)`.
///
/// Records whose storm has no I30 entry are skipped entirely — those
/// storms are excluded from output by policy (see the intensity module).
pub fn aggregate_storms(
    records: &[StormRecord],
    intensities: &[StormIntensity],
) -> Vec<StormErosivity> {
    let i30_by_storm: HashMap<u32, f64> = intensities
        .iter()
        .map(|s| (s.storm_id, s.i30_mm_per_h))
        .collect();

    struct Group {
        ervr: f64,
        end_time: NaiveDateTime,
    }

    let mut groups: BTreeMap<(i32, u32), Group> = BTreeMap::new();
    for record in records {
        if !i30_by_storm.contains_key(&record.storm_id) {
            continue;
        }
        let energy_depth = unit_energy(record.intensity_mm_per_h) * record.depth_mm;
        groups
            .entry((record.timestamp.year(), record.storm_id))
            .and_modify(|g| {
                g.ervr += energy_depth;
                if record.timestamp > g.end_time {
                    g.end_time = record.timestamp;
                }
            })
            .or_insert(Group {
                ervr: energy_depth,
                end_time: record.timestamp,
            });
    }

    groups
        .into_iter()
        .map(|((year, storm_id), group)| {
            let i30_mm_per_h = i30_by_storm[&storm_id];
            StormErosivity {
                year,
                storm_id,
                ervr: group.ervr,
                i30_mm_per_h,
                end_time: group.end_time,
                ei30: group.ervr * i30_mm_per_h,
            }
        })
        .collect()
}

/// Sums EI30 per calendar year and applies the J·m⁻² → MJ·ha⁻¹
/// correction. Ascending by year; empty input gives an empty table.
pub fn aggregate_annual(storms: &[StormErosivity]) -> Vec<AnnualErosivity> {
    let mut totals: BTreeMap<i32, f64> = BTreeMap::new();
    for storm in storms {
        *totals.entry(storm.year).or_insert(0.0) += storm.ei30;
    }

    totals
        .into_iter()
        .map(|(year, total)| AnnualErosivity {
            year,
            r_factor: total / ANNUAL_UNIT_DIVISOR,
        })
        .collect()
}

/// Mean annual R-factor, the run's summary statistic. `None` when no
/// year qualified — the caller reports "no data" instead of a number.
pub fn mean_annual_r(annual: &[AnnualErosivity]) -> Option<f64> {
    if annual.is_empty() {
        return None;
    }
    Some(annual.iter().map(|a| a.r_factor).sum::<f64>() / annual.len() as f64)
}
