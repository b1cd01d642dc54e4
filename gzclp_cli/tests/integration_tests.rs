//! Integration tests for the gzclp binary.
//!
//! These tests verify end-to-end behavior including:
//! - First-run seeding and state persistence
//! - The session rotation and progression commits
//! - Catalog editing
//! - History export

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
    Command::new(assert_cmd::cargo::cargo_bin!("gzclp"))
}

/// Complete the upcoming session with every lift passed
///
/// The default program assigns fixed IDs: session A1 holds lifts 0 (T1
/// Squat), 6 (T2 Bench Press) and 8 (T3 Lat Pulldown).
fn complete_all_passed(data_dir: &Path, ids: &[u32]) {
    let mut cmd = cli();
    cmd.arg("complete").arg("--data-dir").arg(data_dir);
    for id in ids {
        cmd.arg("--pass").arg(id.to_string());
    }
    cmd.assert().success();
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GZCLP linear-progression strength tracker",
        ));
}

#[test]
fn test_first_run_seeds_default_program() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("default GZCLP program"))
        .stdout(predicate::str::contains("Squat"))
        .stdout(predicate::str::contains("Next session: A1"));

    assert!(data_dir.join("program.json").exists());
}

#[test]
fn test_next_shows_tier_sorted_session() {
    let temp_dir = setup_test_dir();

    let output = cli()
        .arg("next")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("SESSION A1"))
        .stdout(predicate::str::contains("5x3+"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8_lossy(&output);
    let squat = stdout.find("Squat").unwrap();
    let bench = stdout.find("Bench Press").unwrap();
    let pulldown = stdout.find("Lat Pulldown").unwrap();
    assert!(squat < bench && bench < pulldown, "not tier-sorted:\n{}", stdout);
}

#[test]
fn test_complete_advances_rotation_and_weight() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--pass")
        .arg("0")
        .arg("--pass")
        .arg("6")
        .arg("--pass")
        .arg("8")
        .assert()
        .success()
        .stdout(predicate::str::contains("Session completed"))
        .stdout(predicate::str::contains("25kg next time"))
        .stdout(predicate::str::contains("Next up: session B1"));

    cli()
        .arg("next")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("SESSION B1"));
}

#[test]
fn test_failed_lift_demotes_rep_scheme() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--fail")
        .arg("0")
        .arg("--pass")
        .arg("6")
        .arg("--pass")
        .arg("8")
        .assert()
        .success()
        .stdout(predicate::str::contains("6x2+ at 20kg next time"));

    // The demotion is persisted
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("T1 6x2+"));
}

#[test]
fn test_rotation_wraps_back_to_a1() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    // A1, B1, A2, B2 in order; lift IDs per session from the default program
    complete_all_passed(&data_dir, &[0, 6, 8]);
    complete_all_passed(&data_dir, &[3, 5, 9]);
    complete_all_passed(&data_dir, &[2, 4, 8]);
    complete_all_passed(&data_dir, &[1, 7, 9]);

    cli()
        .arg("next")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("SESSION A1"));
}

#[test]
fn test_complete_without_results_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_complete_unknown_lift_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--pass")
        .arg("99")
        .assert()
        .failure()
        .stderr(predicate::str::contains("99"));
}

#[test]
fn test_lift_add_and_remove() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("lift")
        .arg("add")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--tier")
        .arg("T3")
        .arg("--name")
        .arg("Face Pull")
        .arg("--increment")
        .arg("2.5")
        .arg("--weight")
        .arg("15")
        .arg("--session")
        .arg("0")
        .arg("--session")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added T3 Face Pull as lift [10]"));

    cli()
        .arg("next")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Face Pull"));

    cli()
        .arg("lift")
        .arg("remove")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("10")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed Face Pull"));

    cli()
        .arg("next")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Face Pull").not());
}

#[test]
fn test_lift_add_rejects_bad_session_index() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("lift")
        .arg("add")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--tier")
        .arg("T3")
        .arg("--name")
        .arg("Curl")
        .arg("--increment")
        .arg("2.5")
        .arg("--weight")
        .arg("10")
        .arg("--session")
        .arg("4")
        .assert()
        .failure();
}

#[test]
fn test_init_sets_starting_weights() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("init")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--squat")
        .arg("60")
        .arg("--bench")
        .arg("40")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup complete"))
        .stdout(predicate::str::contains("60kg"))
        .stdout(predicate::str::contains("40kg"));
}

#[test]
fn test_reset_requires_confirmation() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    complete_all_passed(&data_dir, &[0, 6, 8]);

    cli()
        .arg("reset")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    // Progress untouched
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed sessions: 1"));
}

#[test]
fn test_reset_with_confirmation() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    complete_all_passed(&data_dir, &[0, 6, 8]);

    cli()
        .arg("reset")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--yes")
        .assert()
        .success()
        .stdout(predicate::str::contains("reset to defaults"));

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed sessions: 0"))
        .stdout(predicate::str::contains("Next session: A1"));
}

#[test]
fn test_history_lists_outcomes() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("complete")
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--pass")
        .arg("0")
        .arg("--fail")
        .arg("6")
        .assert()
        .success();

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Session #1"))
        .stdout(predicate::str::contains("✓ Squat"))
        .stdout(predicate::str::contains("✗ Bench Press"));
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    complete_all_passed(&data_dir, &[0, 6, 8]);

    cli()
        .arg("export")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 history rows"));

    let csv_path = data_dir.join("history.csv");
    assert!(csv_path.exists());
    let contents = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(contents.contains("session,completed_at,lift_id"));
    assert!(contents.contains("Squat"));
}

#[test]
fn test_state_persists_across_runs() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    complete_all_passed(&data_dir, &[0, 6, 8]);

    // A separate invocation sees the committed progress
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed sessions: 1"))
        .stdout(predicate::str::contains("Next session: B1"));

    // The saved document keeps the expected field names
    let raw = fs::read_to_string(data_dir.join("program.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["nextSessionId"], 1);
    assert_eq!(doc["completedSessions"].as_array().unwrap().len(), 1);
}

#[test]
fn test_corrupt_state_is_surfaced_not_discarded() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("program.json"), "{ not json }").unwrap();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));

    // The broken file is left in place for the user to inspect
    let contents = fs::read_to_string(data_dir.join("program.json")).unwrap();
    assert_eq!(contents, "{ not json }");
}
