/// Test fixtures: representative precipitation table payloads.
///
/// The literal fixtures are structurally complete but truncated to the
/// minimum needed to exercise the parser. `build_series` constructs
/// in-memory series programmatically, since storm-scale fixtures need
/// 6+ hours of dry records around each burst and would be unreadable as
/// literals.

#[cfg(test)]
use chrono::{Duration, NaiveDateTime};

#[cfg(test)]
use crate::model::SeriesRecord;

/// Six 10-minute samples with a single wet interval (1.5 mm at 16:30).
#[cfg(test)]
pub(crate) fn fixture_ten_minute_csv() -> &'static str {
    "timestamp,value\n\
     2004-05-18 16:10:00,0\n\
     2004-05-18 16:20:00,0\n\
     2004-05-18 16:30:00,1.5\n\
     2004-05-18 16:40:00,0.2\n\
     2004-05-18 16:50:00,0\n\
     2004-05-18 17:00:00,0\n"
}

/// Semicolon-delimited export with compact `YYYYMMDDHHmmSS` timestamps,
/// the format of the original VMM gauge dumps.
#[cfg(test)]
pub(crate) fn fixture_semicolon_csv() -> &'static str {
    "timestamp;value\n\
     20040518161000;0\n\
     20040518162000;0.2\n\
     20040518163000;0\n"
}

/// Header lacks the `value` column — parser must reject at row 1.
#[cfg(test)]
pub(crate) fn fixture_missing_value_column_csv() -> &'static str {
    "timestamp,depth\n\
     2004-05-18 16:10:00,0\n\
     2004-05-18 16:20:00,0.1\n"
}

/// Garbled timestamp on the third line (second data row).
#[cfg(test)]
pub(crate) fn fixture_bad_timestamp_csv() -> &'static str {
    "timestamp,value\n\
     2004-05-18 16:10:00,0\n\
     2004-05-18 XX:20:00,0.1\n\
     2004-05-18 16:30:00,0\n"
}

/// Negative depth on the third line — malformed upstream data.
#[cfg(test)]
pub(crate) fn fixture_negative_depth_csv() -> &'static str {
    "timestamp,value\n\
     2004-05-18 16:10:00,0\n\
     2004-05-18 16:20:00,-0.1\n\
     2004-05-18 16:30:00,0\n"
}

/// Parses a timestamp in the default input format, for terse test setup.
#[cfg(test)]
pub(crate) fn t(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("valid test timestamp")
}

/// Builds a uniform series starting at `start` with spacing `dt_seconds`
/// and the given per-interval depths. Intensity is derived the same way
/// the loader derives it.
#[cfg(test)]
pub(crate) fn build_series(
    start: NaiveDateTime,
    dt_seconds: f64,
    depths: &[f64],
) -> Vec<SeriesRecord> {
    depths
        .iter()
        .enumerate()
        .map(|(i, &depth_mm)| SeriesRecord {
            timestamp: start + Duration::seconds((i as f64 * dt_seconds) as i64),
            depth_mm,
            intensity_mm_per_h: depth_mm / dt_seconds * 3600.0,
        })
        .collect()
}
