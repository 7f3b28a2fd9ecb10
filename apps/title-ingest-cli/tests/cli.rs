//! CLI argument and exit-code behavior
//!
//! Only offline paths are exercised here; runs that reach the repository
//! are covered by the library tests against mocks.

use assert_cmd::Command;
use predicates::prelude::*;

fn title_ingest() -> Command {
    Command::cargo_bin("title-ingest").unwrap()
}

#[test]
fn no_arguments_prints_usage_and_exits_one() {
    title_ingest()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn too_many_arguments_exits_one() {
    title_ingest()
        .args(["dir", "config.toml", "extra"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_exits_zero() {
    title_ingest()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn missing_directory_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    title_ingest()
        .arg(missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn empty_directory_succeeds_without_remote_calls() {
    let dir = tempfile::tempdir().unwrap();

    title_ingest()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn empty_directory_json_output_is_empty_array() {
    let dir = tempfile::tempdir().unwrap();

    title_ingest()
        .args([dir.path().to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn unreadable_config_file_reports_error() {
    let dir = tempfile::tempdir().unwrap();

    title_ingest()
        .args([
            dir.path().to_str().unwrap(),
            dir.path().join("nope.toml").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error"));
}
