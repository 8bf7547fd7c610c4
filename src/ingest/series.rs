/// Precipitation series loader: delimited text parsing + Δt derivation.
///
/// Input is a two-column table (extra columns are ignored):
///
///   timestamp,value
///   2004-05-18 16:10:00,0
///   2004-05-18 16:20:00,0.4
///   ...
///
/// with `timestamp` in a configurable chrono format and `value` the
/// precipitation depth (mm) that fell during the preceding sampling
/// interval. The sampling interval Δt is derived from the first two
/// timestamps and assumed constant for the whole series; per-record
/// intensity (mm/h) is derived as `depth / Δt * 3600`.
///
/// Parsing is a pure text → struct function so the edge cases can be
/// exercised without touching the filesystem; `load_series` is the thin
/// file-reading wrapper the pipeline calls.

use chrono::NaiveDateTime;

use crate::config::RunConfig;
use crate::model::{ErosivityError, SeriesRecord};

/// Reads and parses the configured input file.
pub fn load_series(config: &RunConfig) -> Result<(Vec<SeriesRecord>, f64), ErosivityError> {
    let text = std::fs::read_to_string(&config.input_path)
        .map_err(|e| ErosivityError::Io(format!("{}: {}", config.input_path, e)))?;

    parse_series(
        &text,
        config.delimiter,
        &config.timestamp_format,
        config.sample_limit,
    )
}

/// Parses a delimited precipitation table into records plus Δt (seconds).
///
/// Rejects anything that would silently corrupt the downstream
/// computation: missing `timestamp`/`value` columns, unparseable
/// timestamps, non-numeric / negative / non-finite depths, rows whose
/// timestamps do not strictly increase, and series too short to derive
/// Δt. Row numbers in errors are 1-based file line numbers.
pub fn parse_series(
    text: &str,
    delimiter: char,
    timestamp_format: &str,
    sample_limit: Option<usize>,
) -> Result<(Vec<SeriesRecord>, f64), ErosivityError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_row, header_line) = lines.next().ok_or(ErosivityError::InputFormat {
        row: 1,
        message: "empty input, expected a header line".to_string(),
    })?;

    let headers: Vec<&str> = header_line.split(delimiter).map(|h| h.trim()).collect();
    let timestamp_col = headers.iter().position(|&h| h == "timestamp").ok_or(
        ErosivityError::InputFormat {
            row: header_row + 1,
            message: format!("missing 'timestamp' column in header '{}'", header_line.trim()),
        },
    )?;
    let value_col =
        headers
            .iter()
            .position(|&h| h == "value")
            .ok_or(ErosivityError::InputFormat {
                row: header_row + 1,
                message: format!("missing 'value' column in header '{}'", header_line.trim()),
            })?;

    let mut timestamps: Vec<NaiveDateTime> = Vec::new();
    let mut depths: Vec<f64> = Vec::new();

    for (index, line) in lines {
        if let Some(limit) = sample_limit {
            if timestamps.len() >= limit {
                break;
            }
        }

        let row = index + 1;
        let fields: Vec<&str> = line.split(delimiter).collect();

        let timestamp_field =
            fields
                .get(timestamp_col)
                .ok_or_else(|| ErosivityError::InputFormat {
                    row,
                    message: "row has no timestamp field".to_string(),
                })?;
        let timestamp = NaiveDateTime::parse_from_str(timestamp_field.trim(), timestamp_format)
            .map_err(|e| ErosivityError::InputFormat {
                row,
                message: format!("unparseable timestamp '{}': {}", timestamp_field.trim(), e),
            })?;

        if let Some(&previous) = timestamps.last() {
            if timestamp <= previous {
                return Err(ErosivityError::InputFormat {
                    row,
                    message: format!(
                        "timestamp {} does not increase past previous record {}",
                        timestamp, previous
                    ),
                });
            }
        }

        let value_field = fields
            .get(value_col)
            .ok_or_else(|| ErosivityError::InputFormat {
                row,
                message: "row has no value field".to_string(),
            })?;
        let depth: f64 =
            value_field
                .trim()
                .parse()
                .map_err(|_| ErosivityError::InputFormat {
                    row,
                    message: format!("non-numeric depth '{}'", value_field.trim()),
                })?;
        if !depth.is_finite() || depth < 0.0 {
            return Err(ErosivityError::InputFormat {
                row,
                message: format!("depth must be a non-negative finite number, got {}", depth),
            });
        }

        timestamps.push(timestamp);
        depths.push(depth);
    }

    if timestamps.len() < 2 {
        return Err(ErosivityError::InsufficientData(timestamps.len()));
    }

    // Δt from the first interval, assumed constant for the whole series.
    let dt_seconds = (timestamps[1] - timestamps[0]).num_seconds() as f64;
    if dt_seconds <= 0.0 {
        return Err(ErosivityError::InputFormat {
            row: 3,
            message: format!("derived sampling interval is {} s", dt_seconds),
        });
    }

    let records = timestamps
        .into_iter()
        .zip(depths)
        .map(|(timestamp, depth_mm)| SeriesRecord {
            timestamp,
            depth_mm,
            intensity_mm_per_h: depth_mm / dt_seconds * 3600.0,
        })
        .collect();

    Ok((records, dt_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    #[test]
    fn test_parse_ten_minute_series_derives_600s_interval() {
        let (records, dt) = parse_series(fixture_ten_minute_csv(), ',', "%Y-%m-%d %H:%M:%S", None)
            .expect("fixture should parse");
        assert_eq!(dt, 600.0, "10-minute data must yield Δt = 600 s exactly");
        assert_eq!(records.len(), 6);
    }

    #[test]
    fn test_parse_derives_intensity_from_depth_and_interval() {
        let (records, _) = parse_series(fixture_ten_minute_csv(), ',', "%Y-%m-%d %H:%M:%S", None)
            .expect("fixture should parse");
        // 1.5 mm over 10 minutes is 9 mm/h.
        let wet = records.iter().find(|r| r.depth_mm == 1.5).expect("wet record");
        assert!((wet.intensity_mm_per_h - 9.0).abs() < 1e-12);
        // Dry intervals carry zero intensity.
        assert!(records.iter().filter(|r| r.depth_mm == 0.0).all(|r| r.intensity_mm_per_h == 0.0));
    }

    #[test]
    fn test_parse_semicolon_delimiter_and_compact_format() {
        let (records, dt) = parse_series(fixture_semicolon_csv(), ';', "%Y%m%d%H%M%S", None)
            .expect("semicolon fixture should parse");
        assert_eq!(dt, 600.0);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].depth_mm, 0.2);
    }

    #[test]
    fn test_parse_ignores_extra_columns_and_column_order() {
        let text = "station,value,timestamp\nP01,0.0,2004-01-01 00:00:00\nP01,0.3,2004-01-01 00:10:00\n";
        let (records, _) = parse_series(text, ',', "%Y-%m-%d %H:%M:%S", None)
            .expect("reordered header should parse");
        assert_eq!(records[1].depth_mm, 0.3);
    }

    #[test]
    fn test_sample_limit_caps_rows() {
        let (records, _) =
            parse_series(fixture_ten_minute_csv(), ',', "%Y-%m-%d %H:%M:%S", Some(3))
                .expect("fixture should parse");
        assert_eq!(records.len(), 3, "sample_limit should cap data rows");
    }

    #[test]
    fn test_missing_value_column_is_input_format_error() {
        let err = parse_series(fixture_missing_value_column_csv(), ',', "%Y-%m-%d %H:%M:%S", None)
            .expect_err("header without 'value' must be rejected");
        match err {
            ErosivityError::InputFormat { row, .. } => assert_eq!(row, 1),
            other => panic!("expected InputFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_timestamp_reports_row_number() {
        let err = parse_series(fixture_bad_timestamp_csv(), ',', "%Y-%m-%d %H:%M:%S", None)
            .expect_err("garbled timestamp must be rejected");
        match err {
            ErosivityError::InputFormat { row, message } => {
                assert_eq!(row, 3, "error should point at the offending line");
                assert!(message.contains("timestamp"), "message: {}", message);
            }
            other => panic!("expected InputFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_depth_is_rejected() {
        let err = parse_series(fixture_negative_depth_csv(), ',', "%Y-%m-%d %H:%M:%S", None)
            .expect_err("negative depth must be rejected");
        assert!(matches!(err, ErosivityError::InputFormat { row: 3, .. }));
    }

    #[test]
    fn test_non_increasing_timestamps_are_rejected() {
        let text = "timestamp,value\n2004-01-01 00:10:00,0.1\n2004-01-01 00:10:00,0.2\n";
        let err = parse_series(text, ',', "%Y-%m-%d %H:%M:%S", None)
            .expect_err("duplicate timestamp must be rejected");
        assert!(matches!(err, ErosivityError::InputFormat { row: 3, .. }));
    }

    #[test]
    fn test_single_record_is_insufficient_data() {
        let text = "timestamp,value\n2004-01-01 00:00:00,0.5\n";
        let err = parse_series(text, ',', "%Y-%m-%d %H:%M:%S", None)
            .expect_err("one record cannot define Δt");
        assert_eq!(err, ErosivityError::InsufficientData(1));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = parse_series("", ',', "%Y-%m-%d %H:%M:%S", None)
            .expect_err("empty input must be rejected");
        assert!(matches!(err, ErosivityError::InputFormat { row: 1, .. }));
    }
}
