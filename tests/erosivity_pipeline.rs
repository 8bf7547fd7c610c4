/// Integration tests for the full erosivity pipeline
///
/// These tests verify, end to end on synthetic 10-minute gauge data:
/// 1. Δt derivation and intensity at the load boundary
/// 2. Storm segmentation → erosive filter → I30 → EI30 → annual R
/// 3. The EI30 formula against a manual computation (6 significant digits)
/// 4. Empty-after-filtering inputs: empty tables, header-only files, no crash
/// 5. Idempotence: rerunning the pipeline reproduces byte-identical output
///
/// Inputs and results are written under the system temp directory with
/// process-unique names, so parallel test runs do not collide.

use rfactor_pipeline::analysis::erosivity::{mean_annual_r, unit_energy};
use rfactor_pipeline::config::RunConfig;
use rfactor_pipeline::ingest::series::load_series;
use rfactor_pipeline::output;
use rfactor_pipeline::pipeline;

use chrono::{Duration, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

/// Renders a comma-delimited 10-minute series starting 2004-05-18 00:00:00.
fn render_csv(depths: &[f64]) -> String {
    let start =
        NaiveDateTime::parse_from_str("2004-05-18 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    let mut text = String::from("timestamp,value\n");
    for (i, depth) in depths.iter().enumerate() {
        let timestamp = start + Duration::minutes(10 * i as i64);
        text.push_str(&format!("{},{}\n", timestamp.format("%Y-%m-%d %H:%M:%S"), depth));
    }
    text
}

/// Writes the series to a temp input file and returns a config pointing
/// its results at a sibling temp directory.
fn setup_run(name: &str, depths: &[f64]) -> RunConfig {
    let base = std::env::temp_dir().join(format!("rfactor_it_{}_{}", std::process::id(), name));
    let input = base.with_extension("csv");
    fs::write(&input, render_csv(depths)).expect("writing test input should succeed");

    let mut config = RunConfig::new(&input.to_string_lossy());
    config.results_dir = base.with_extension("results").to_string_lossy().into_owned();
    config
}

fn cleanup(config: &RunConfig) {
    fs::remove_file(&config.input_path).ok();
    fs::remove_dir_all(&config.results_dir).ok();
}

/// An isolated 3-interval burst: 40 dry records, 5 mm × 3, 40 dry records.
fn isolated_storm_depths() -> Vec<f64> {
    let mut depths = vec![0.0; 40];
    depths.extend([5.0, 5.0, 5.0]);
    depths.extend(vec![0.0; 40]);
    depths
}

#[test]
fn test_load_boundary_derives_600s_interval_and_intensity() {
    let config = setup_run("load_boundary", &isolated_storm_depths());

    let (records, dt) = load_series(&config).expect("input should load");
    assert_eq!(dt, 600.0, "10-minute data must yield Δt = 600 s exactly");
    // 5 mm per 10-minute interval is 30 mm/h.
    assert!((records[40].intensity_mm_per_h - 30.0).abs() < 1e-12);

    cleanup(&config);
}

#[test]
fn test_isolated_storm_matches_manual_ei30_computation() {
    let config = setup_run("manual_ei30", &isolated_storm_depths());
    let run = pipeline::run(&config).expect("pipeline should succeed");

    assert_eq!(run.storm_table.len(), 1, "exactly one qualifying storm");
    let storm = &run.storm_table[0];
    assert_eq!(storm.year, 2004);

    // Manual computation: each wet record has intensity 30 mm/h, so
    // e = 11.12 · 30^0.31 per mm, weighted by 5 mm, over 3 records; the
    // peak 30-minute window holds all 15 mm, so I30 = 30 mm/h.
    let expected_ervr = 3.0 * (11.12 * 30.0_f64.powf(0.31)) * 5.0;
    let expected_ei30 = expected_ervr * 30.0;

    assert!((storm.i30_mm_per_h - 30.0).abs() < 1e-9, "I30 = {}", storm.i30_mm_per_h);
    assert!(
        ((storm.ervr - expected_ervr) / expected_ervr).abs() < 1e-6,
        "ervr {} vs manual {}",
        storm.ervr,
        expected_ervr
    );
    assert!(
        ((storm.ei30 - expected_ei30) / expected_ei30).abs() < 1e-6,
        "EI30 {} vs manual {}",
        storm.ei30,
        expected_ei30
    );

    assert_eq!(run.annual_table.len(), 1);
    let annual = &run.annual_table[0];
    assert_eq!(annual.year, 2004);
    assert!(((annual.r_factor - expected_ei30 / 100.0) / annual.r_factor).abs() < 1e-6);

    // The same value through the library helper used by aggregation.
    assert!((unit_energy(30.0) - 11.12 * 30.0_f64.powf(0.31)).abs() < 1e-12);

    cleanup(&config);
}

#[test]
fn test_detail_tables_are_written_with_expected_layout() {
    let config = setup_run("detail_tables", &isolated_storm_depths());
    pipeline::run(&config).expect("pipeline should succeed");

    let basename = output::table_basename(&config.input_path);
    let storm_csv =
        fs::read_to_string(output::storm_table_path(&config.results_dir, &basename))
            .expect("EI30 table should be written");
    let annual_csv =
        fs::read_to_string(output::annual_table_path(&config.results_dir, &basename))
            .expect("R table should be written");

    assert!(storm_csv.starts_with("year,storm_id,ervr,I30,timestamp,EI30\n"));
    assert_eq!(storm_csv.lines().count(), 2, "header + one storm row");
    assert!(annual_csv.starts_with("year,EI30\n"));
    assert_eq!(annual_csv.lines().count(), 2, "header + one year row");

    cleanup(&config);
}

#[test]
fn test_no_detail_skips_file_output() {
    let mut config = setup_run("no_detail", &isolated_storm_depths());
    config.write_detail = false;

    let run = pipeline::run(&config).expect("pipeline should succeed");
    assert_eq!(run.annual_table.len(), 1, "annual table returned regardless");
    assert!(
        !PathBuf::from(&config.results_dir).exists(),
        "no results directory should be created without detail output"
    );

    cleanup(&config);
}

#[test]
fn test_below_threshold_input_yields_empty_but_well_formed_output() {
    // One storm totalling 1.0 mm — below the 1.27 mm erosive threshold.
    let mut depths = vec![0.0; 10];
    depths.extend([0.5, 0.5]);
    depths.extend(vec![0.0; 10]);

    let config = setup_run("below_threshold", &depths);
    let run = pipeline::run(&config).expect("an empty storm set is not an error");

    assert!(run.storm_table.is_empty());
    assert!(run.annual_table.is_empty());
    assert_eq!(mean_annual_r(&run.annual_table), None, "summary must report no data");

    // Files still exist, header-only.
    let basename = output::table_basename(&config.input_path);
    assert_eq!(
        fs::read_to_string(output::storm_table_path(&config.results_dir, &basename)).unwrap(),
        "year,storm_id,ervr,I30,timestamp,EI30\n"
    );
    assert_eq!(
        fs::read_to_string(output::annual_table_path(&config.results_dir, &basename)).unwrap(),
        "year,EI30\n"
    );

    cleanup(&config);
}

#[test]
fn test_two_storms_aggregate_into_one_annual_total() {
    // Two qualifying storms, separated by more than 6 dry hours.
    let mut depths = vec![0.0; 40];
    depths.extend([5.0, 5.0, 5.0]);
    depths.extend(vec![0.0; 42]);
    depths.extend([2.0, 2.0, 2.0]);
    depths.extend(vec![0.0; 40]);

    let config = setup_run("two_storms", &depths);
    let run = pipeline::run(&config).expect("pipeline should succeed");

    assert_eq!(run.storm_table.len(), 2);
    assert!(run.storm_table[0].storm_id < run.storm_table[1].storm_id);
    assert_eq!(run.annual_table.len(), 1);

    let summed: f64 = run.storm_table.iter().map(|s| s.ei30).sum();
    assert!(
        ((run.annual_table[0].r_factor - summed / 100.0) / run.annual_table[0].r_factor).abs()
            < 1e-12,
        "annual R must be the per-storm EI30 sum over 100"
    );

    cleanup(&config);
}

#[test]
fn test_pipeline_is_idempotent() {
    let config = setup_run("idempotent", &isolated_storm_depths());

    let first = pipeline::run(&config).expect("first run should succeed");
    let basename = output::table_basename(&config.input_path);
    let storm_path = output::storm_table_path(&config.results_dir, &basename);
    let annual_path = output::annual_table_path(&config.results_dir, &basename);
    let first_storm_csv = fs::read_to_string(&storm_path).unwrap();
    let first_annual_csv = fs::read_to_string(&annual_path).unwrap();

    let second = pipeline::run(&config).expect("second run should succeed");

    assert_eq!(first, second, "reruns must produce identical tables");
    assert_eq!(fs::read_to_string(&storm_path).unwrap(), first_storm_csv);
    assert_eq!(fs::read_to_string(&annual_path).unwrap(), first_annual_csv);

    cleanup(&config);
}
