/// Storm segmentation and the erosive-storm filter.
///
/// A storm ends once 6 consecutive hours pass without rain: following
/// Verstraeten et al. (2006), every record carries the depth total of
/// the 6 hours preceding it, and a new storm begins at the record where
/// that total transitions from positive to zero. Storms whose total
/// depth does not exceed 1.27 mm are not erosive and are dropped from
/// all downstream tables.

use std::collections::BTreeMap;

use crate::analysis::rolling::trailing_sums_exclusive;
use crate::model::{DRY_PERIOD_SECONDS, EROSIVE_DEPTH_THRESHOLD_MM, SeriesRecord, StormRecord};

/// Partitions the series into storms.
///
/// Tags every record with a 0-based, non-decreasing `storm_id` and its
/// position in the input series. A new storm starts at index `i >= 1`
/// iff the trailing 6-hour sum was positive at `i - 1` and is `<= 0` at
/// `i` (a sum of exactly zero counts as dry). A series shorter than the
/// 6-hour window has all sums zero and therefore a single storm.
///
/// An empty input produces an empty output, not an error — the loader
/// boundary already guarantees at least two records for real runs.
pub fn segment_storms(records: &[SeriesRecord], dt_seconds: f64) -> Vec<StormRecord> {
    if records.is_empty() {
        return Vec::new();
    }

    let window = (DRY_PERIOD_SECONDS / dt_seconds).floor() as usize;
    let depths: Vec<f64> = records.iter().map(|r| r.depth_mm).collect();
    let six_hour = trailing_sums_exclusive(&depths, window);

    let mut storm_id: u32 = 0;
    let mut tagged = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        if i >= 1 && six_hour[i - 1] > 0.0 && six_hour[i] <= 0.0 {
            storm_id += 1;
        }
        tagged.push(StormRecord {
            series_index: i,
            storm_id,
            timestamp: record.timestamp,
            depth_mm: record.depth_mm,
            intensity_mm_per_h: record.intensity_mm_per_h,
        });
    }

    tagged
}

/// Keeps only records of erosive storms: total storm depth strictly
/// greater than 1.27 mm. Non-qualifying storms disappear entirely; an
/// input where no storm qualifies yields an empty vector.
pub fn filter_erosive(tagged: Vec<StormRecord>) -> Vec<StormRecord> {
    let mut totals: BTreeMap<u32, f64> = BTreeMap::new();
    for record in &tagged {
        *totals.entry(record.storm_id).or_insert(0.0) += record.depth_mm;
    }

    tagged
        .into_iter()
        .filter(|record| totals[&record.storm_id] > EROSIVE_DEPTH_THRESHOLD_MM)
        .collect()
}
