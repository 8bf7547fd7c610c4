/// Maximum 30-minute intensity (I30) per storm.
///
/// For each record whose series position leaves room for a full
/// 30-minute look-back, the depths of the surviving records inside that
/// look-back are summed and doubled (a 30-minute depth total, expressed
/// as an hourly rate). A storm's I30 is the maximum such value over its
/// records.
///
/// Windows are measured in *series* positions, so the look-back spans
/// real elapsed time even though the input has already been filtered to
/// erosive storms. Records dropped by the filter cannot contribute depth
/// to any window: a kept storm is separated from its neighbors by at
/// least 6 dry hours, far wider than the 30-minute window.
///
/// A storm none of whose records reaches the 30-minute mark (only
/// possible at the very start of the series) has no defined I30. Such a
/// storm gets no entry in the result and is thereby excluded from the
/// EI30 and annual tables.

use std::collections::BTreeMap;

use crate::model::{I30_WINDOW_SECONDS, StormIntensity, StormRecord};

/// Computes each storm's maximum 30-minute intensity, in mm/h.
///
/// Input records must be in series order (the segmenter's output order).
/// Returns one entry per storm with a defined I30, ascending by storm id.
pub fn compute_i30(records: &[StormRecord], dt_seconds: f64) -> Vec<StormIntensity> {
    // Number of *additional* records besides the current one inside a
    // 30-minute window; for 10-minute data this is 2 (three records).
    let span = ((I30_WINDOW_SECONDS / dt_seconds).floor() as i64 - 1).max(0) as usize;

    let mut maxima: BTreeMap<u32, f64> = BTreeMap::new();
    let mut window_sum = 0.0;
    let mut start = 0usize;

    for record in records {
        window_sum += record.depth_mm;
        while records[start].series_index + span < record.series_index {
            window_sum -= records[start].depth_mm;
            start += 1;
        }

        if record.series_index >= span {
            let intensity = window_sum * 2.0;
            maxima
                .entry(record.storm_id)
                .and_modify(|max| {
                    if intensity > *max {
                        *max = intensity;
                    }
                })
                .or_insert(intensity);
        }
    }

    maxima
        .into_iter()
        .map(|(storm_id, i30_mm_per_h)| StormIntensity {
            storm_id,
            i30_mm_per_h,
        })
        .collect()
}
