//! Command line tests for the symbol_clusters binary

use predicates::prelude::*;
use std::fs;

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("target")).unwrap();
    fs::write(dir.path().join("src/main.rs"), "fn main() { a::b(); }\n").unwrap();
    fs::write(dir.path().join("src/tool.py"), "x = {'k': [1]}\n").unwrap();
    fs::write(dir.path().join("target/out.rs"), "@@@\n").unwrap();
    dir
}

#[test]
fn test_prints_table_per_extension() {
    let dir = fixture();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("symbol_clusters");
    cmd.arg(dir.path()).args(["--ext", "rs,py", "--top", "3"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Extension 'rs'"))
        .stdout(predicate::str::contains("Extension 'py'"))
        .stdout(predicate::str::contains("Extension '*'"))
        .stdout(predicate::str::contains("|  single  |"))
        .stdout(predicate::str::contains("@").not());
}

#[test]
fn test_single_extension_hides_combined() {
    let dir = fixture();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("symbol_clusters");
    cmd.arg(dir.path()).args(["-e", "rs", "--md"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("```\nExtension 'rs'"))
        .stdout(predicate::str::contains("Extension '*'").not());
}

#[test]
fn test_json_export_in_quiet_mode() {
    let dir = fixture();
    let json_path = dir.path().join("report.json");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("symbol_clusters");
    cmd.arg(dir.path())
        .args(["-e", "rs", "--quiet", "--json"])
        .arg(&json_path);

    cmd.assert().success().stdout(predicate::str::is_empty());

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["top"], 10);
    assert_eq!(value["scopes"][0]["scope"], "rs");
}

#[test]
fn test_missing_path_fails() {
    let dir = fixture();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("symbol_clusters");
    cmd.arg(dir.path().join("nope"));

    let output = cmd.assert().failure().get_output().clone();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Path not found").count(), 1, "{}", stderr);
}

#[test]
fn test_rejects_invalid_width() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("symbol_clusters");
    cmd.args(["--width", "4"]);

    cmd.assert().failure();
}
