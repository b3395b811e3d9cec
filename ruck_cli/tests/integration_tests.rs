//! Integration tests for the ruck binary.
//!
//! These tests verify end-to-end behavior including:
//! - Estimation output for the baseline scenario
//! - Save / list / delete / clear over the history file
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("ruck"))
}

/// Helper to run a command against a given data directory
fn cli_in(data_dir: &Path) -> Command {
    let mut cmd = cli();
    cmd.arg("--data-dir").arg(data_dir);
    cmd
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rucking calorie calculator"));
}

#[test]
fn test_default_estimate_matches_baseline_scenario() {
    let temp_dir = setup_test_dir();

    // 180 lb walker, 35 lb pack, 5 mi in 1h30m on trail, 2% grade
    cli_in(temp_dir.path())
        .arg("estimate")
        .assert()
        .success()
        .stdout(predicate::str::contains("805 kcal"))
        .stdout(predicate::str::contains("537 kcal/h"))
        .stdout(predicate::str::contains("6.6 METs"))
        .stdout(predicate::str::contains("18:00 /mi"));
}

#[test]
fn test_metric_estimate_uses_km_pace() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--units")
        .arg("metric")
        .arg("--body-weight")
        .arg("80")
        .arg("--ruck-weight")
        .arg("15")
        .arg("--distance")
        .arg("8")
        .assert()
        .success()
        .stdout(predicate::str::contains("/km"));
}

#[test]
fn test_invalid_input_reports_each_field() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--age")
        .arg("5")
        .arg("--distance")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("age: Must be between 10 and 99."))
        .stderr(predicate::str::contains("distance: Must be positive."));
}

#[test]
fn test_invalid_input_does_not_touch_history() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--distance")
        .arg("0")
        .arg("--save")
        .assert()
        .failure();

    assert!(!temp_dir.path().join("history.json").exists());
}

#[test]
fn test_save_writes_history_file() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--save")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout saved"));

    let history_path = temp_dir.path().join("history.json");
    let contents = fs::read_to_string(&history_path).expect("history file missing");
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();

    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["result"]["totalCalories"], 805);
    assert_eq!(list[0]["input"]["unitSystem"], "imperial");
}

#[test]
fn test_history_lists_saved_workouts_newest_first() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--save")
        .assert()
        .success();
    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--distance")
        .arg("3")
        .arg("--save")
        .assert()
        .success();

    let output = cli_in(temp_dir.path()).arg("history").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("2 saved workout(s)"));
    // Newest (3 mi) listed before the first (5 mi)
    let three = stdout.find("3 mi").expect("3 mi row missing");
    let five = stdout.find("5 mi").expect("5 mi row missing");
    assert!(three < five);
}

#[test]
fn test_empty_history_message() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved workouts yet."));
}

#[test]
fn test_delete_removes_only_matching_workout() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--save")
        .assert()
        .success();
    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--save")
        .assert()
        .success();

    let contents = fs::read_to_string(temp_dir.path().join("history.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let first_id = parsed[0]["id"].as_str().unwrap().to_string();
    let second_id = parsed[1]["id"].as_str().unwrap().to_string();

    cli_in(temp_dir.path())
        .arg("delete")
        .arg(&first_id)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted workout"));

    let contents = fs::read_to_string(temp_dir.path().join("history.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let list = parsed.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], second_id.as_str());
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let temp_dir = setup_test_dir();

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--save")
        .assert()
        .success();

    cli_in(temp_dir.path())
        .arg("delete")
        .arg("no-such-id")
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));

    let contents = fs::read_to_string(temp_dir.path().join("history.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 1);
}

#[test]
fn test_clear_then_export_yields_header_only_csv() {
    let temp_dir = setup_test_dir();
    let csv_path = temp_dir.path().join("out.csv");

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--save")
        .assert()
        .success();
    cli_in(temp_dir.path()).arg("clear").assert().success();

    cli_in(temp_dir.path())
        .arg("export")
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 0 workout(s)"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("ID,Date,Unit System,"));
}

#[test]
fn test_export_includes_saved_rows() {
    let temp_dir = setup_test_dir();
    let csv_path = temp_dir.path().join("out.csv");

    cli_in(temp_dir.path())
        .arg("estimate")
        .arg("--save")
        .assert()
        .success();

    cli_in(temp_dir.path())
        .arg("export")
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 workout(s)"));

    let contents = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("imperial,male,30,180,35,5,1,30,trail,2,805,537,6.6,18,0"));
}

#[test]
fn test_corrupt_history_degrades_to_empty() {
    let temp_dir = setup_test_dir();
    fs::write(temp_dir.path().join("history.json"), "not json at all").unwrap();

    cli_in(temp_dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved workouts yet."));
}
