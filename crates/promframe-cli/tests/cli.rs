//! End-to-end tests against the compiled `promframe` binary.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

const SNAPSHOT_BODY: &str = r#"{
    "status": "success",
    "data": {
        "resultType": "matrix",
        "result": [
            {"metric": {"service": "auth"}, "values": [[1.0, "10"], [2.0, "20"]]},
            {"metric": {"service": "billing"}, "values": [[2.0, "5"], [3.0, "6"]]}
        ]
    }
}"#;

fn write_snapshot(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("promframe-e2e-{}-{name}", std::process::id()));
    std::fs::write(&path, SNAPSHOT_BODY).unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("promframe")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("frame"))
        .stdout(predicate::str::contains("correlate"));
}

#[test]
fn labels_prints_snapshot_schema() {
    let snapshot = write_snapshot("labels.json");

    Command::cargo_bin("promframe")
        .unwrap()
        .arg("labels")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("service: auth, billing"));

    std::fs::remove_file(snapshot).ok();
}

#[test]
fn frame_emits_csv_on_stdout() {
    let snapshot = write_snapshot("frame.json");

    Command::cargo_bin("promframe")
        .unwrap()
        .arg("frame")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("timestamps,auth,billing"))
        .stdout(predicate::str::contains("1000,10,0"));

    std::fs::remove_file(snapshot).ok();
}

#[test]
fn frame_rejects_malformed_selection() {
    let snapshot = write_snapshot("badselect.json");

    Command::cargo_bin("promframe")
        .unwrap()
        .arg("frame")
        .arg(&snapshot)
        .arg("--select")
        .arg("service")
        .assert()
        .failure()
        .stderr(predicate::str::contains("key=value"));

    std::fs::remove_file(snapshot).ok();
}

#[test]
fn missing_snapshot_fails_with_io_error() {
    Command::cargo_bin("promframe")
        .unwrap()
        .arg("labels")
        .arg("/nonexistent/snapshot.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
