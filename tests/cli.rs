mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("world-ranks").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("world-ranks"));
}

#[test]
fn cli_rejects_unknown_region() {
    let mut cmd = Command::cargo_bin("world-ranks").unwrap();
    cmd.args(["list", "--region", "atlantis"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown region"));
}

#[test]
fn cli_lists_and_saves_against_local_server() {
    let (base, seen) = common::serve(vec![(200, common::SAMPLE_ALL.to_string())]);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ranks.json");

    let mut cmd = Command::cargo_bin("world-ranks").unwrap();
    cmd.env("WORLD_RANKS_BASE_URL", &base).args([
        "list",
        "--region",
        "europe",
        "--sort",
        "area",
        "--un-member",
        "--out",
        out.to_str().unwrap(),
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 3 countries"))
        .stdout(predicate::str::contains("8,515,767"))
        .stderr(predicate::str::contains("Saved 3 rows"));

    assert!(seen.lock().unwrap()[0].starts_with("GET /v3.1/region/europe?"));
    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr[0]["name"]["common"], "Brazil");
    assert_eq!(arr[0]["displayArea"], "8,515,767");
}

#[test]
fn cli_reports_fetch_failure() {
    let (base, _) = common::serve(vec![(200, r#"{"message":"nope"}"#.to_string())]);
    let mut cmd = Command::cargo_bin("world-ranks").unwrap();
    cmd.args(["--base-url", base.as_str(), "list"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("fetch failed"));
}

#[test]
fn browse_reads_commands_from_stdin() {
    let (base, _) = common::serve(vec![
        (200, common::SAMPLE_ALL.to_string()),
        (200, common::SAMPLE_ALL.to_string()),
    ]);
    let mut cmd = assert_cmd::Command::cargo_bin("world-ranks").unwrap();
    cmd.args(["--base-url", base.as_str(), "browse"])
        .write_stdin("search fr\nfoo\nquit\n");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 5 countries"))
        .stdout(predicate::str::contains("Found 2 countries"))
        .stdout(predicate::str::contains("unknown command 'foo'"));
}
