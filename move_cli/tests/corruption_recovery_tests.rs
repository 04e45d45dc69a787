//! Corruption recovery tests for the move binary.
//!
//! These tests verify the system can handle:
//! - Corrupted progress files
//! - Records written by older builds with missing fields
//! - Unknown values from newer builds

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("move"));
    cmd.env("XDG_CONFIG_HOME", temp_dir.path().join("config"))
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--now")
        .arg("2026-10-21T12:00");
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn progress_path(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("workout-tracker-progress.json")
}

fn stored(temp_dir: &TempDir) -> serde_json::Value {
    let contents = fs::read_to_string(progress_path(temp_dir)).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[test]
fn test_corrupted_progress_file_starts_fresh() {
    let temp_dir = setup_test_dir();
    fs::write(progress_path(&temp_dir), "{ invalid json }}}}").unwrap();

    cli(&temp_dir)
        .args(["toggle", "mon-w1"])
        .assert()
        .success();

    // The corrupt record was replaced with a valid one
    let progress = stored(&temp_dir);
    assert_eq!(progress["weekStartDate"], "2026-10-19");
    assert_eq!(progress["completedExercises"]["mon-w1"], true);
}

#[test]
fn test_non_object_progress_file_starts_fresh() {
    let temp_dir = setup_test_dir();
    fs::write(progress_path(&temp_dir), "[1, 2, 3]").unwrap();

    cli(&temp_dir).arg("week").assert().success();
    assert_eq!(stored(&temp_dir)["streak"], 0);
}

#[test]
fn test_empty_progress_file() {
    let temp_dir = setup_test_dir();
    fs::write(progress_path(&temp_dir), "").unwrap();

    cli(&temp_dir).arg("stats").assert().success();
}

#[test]
fn test_old_record_is_backfilled() {
    let temp_dir = setup_test_dir();
    // Written before history, swaps and preferences existed
    fs::write(
        progress_path(&temp_dir),
        r#"{
            "completedExercises": {"mon-w1": true},
            "weekStartDate": "2026-10-19",
            "streak": 2,
            "lastCompletedWeek": "2026-10-12",
            "notes": {}
        }"#,
    )
    .unwrap();

    cli(&temp_dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak:   2 weeks"));

    let progress = stored(&temp_dir);
    assert_eq!(progress["completedExercises"]["mon-w1"], true);
    assert_eq!(progress["workoutHistory"], serde_json::json!([]));
    assert_eq!(progress["difficulty"], "beginner");
    assert_eq!(progress["hasSeenOnboarding"], true);
}

#[test]
fn test_unknown_values_from_newer_builds() {
    let temp_dir = setup_test_dir();
    fs::write(
        progress_path(&temp_dir),
        r#"{
            "weekStartDate": "2026-10-19",
            "difficulty": "legendary",
            "achievements": ["first_workout", "marathoner"],
            "futureField": {"nested": true}
        }"#,
    )
    .unwrap();

    cli(&temp_dir)
        .arg("achievements")
        .assert()
        .success()
        .stdout(predicate::str::contains("1/12 achievements unlocked"));

    let progress = stored(&temp_dir);
    assert_eq!(progress["difficulty"], "intermediate");
    assert_eq!(
        progress["achievements"],
        serde_json::json!(["first_workout", "marathoner"])
    );
}
