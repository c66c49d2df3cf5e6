//! Black-box runs of the `bo` binary over a throwaway data directory.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const HEROES: &str = r#"[
  {"heroCode": "H1", "heroName": "Hero One", "movies": [
    {"movieCode": "M1", "title": "First"}, {"movieCode": "M3", "title": "Third"}]},
  {"heroCode": "H2", "heroName": "Hero Two", "movies": [
    {"movieCode": "M2", "title": "Second"}]}
]"#;

const TOWNS: &str = r#"{"NIZAM": ["Hyderabad", "Warangal"], "TAMIL_NADU": ["Chennai"]}"#;

const COLLECTIONS: &str = r#"{"DAY1": [
  {"movieCode": "M1", "collections": {"Hyderabad": 120, "Chennai": null}},
  {"movieCode": "M2", "collections": {"Hyderabad": 80, "Chennai": 50}},
  {"movieCode": "M3", "collections": {"Hyderabad": 80, "Vizag": 3}}
]}"#;

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_feeds(dir.path(), HEROES, TOWNS, COLLECTIONS);
    dir
}

fn write_feeds(dir: &Path, heroes: &str, towns: &str, collections: &str) {
    fs::write(dir.join("heroes.json"), heroes).unwrap();
    fs::write(dir.join("towns_by_territory.json"), towns).unwrap();
    fs::write(dir.join("collections.json"), collections).unwrap();
}

fn bo(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bo").unwrap();
    cmd.env_remove("BO_DATA_DIR").env_remove("BO_LOG").arg("--data").arg(data);
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn compare_prints_the_worked_example() {
    let data = data_dir();
    let v = stdout_json(bo(data.path()).args([
        "compare", "-m", "M1", "-m", "M2", "--town", "Hyderabad", "--town", "Chennai",
    ]));

    assert!(v["id"].as_str().unwrap().starts_with("CMP:"));
    assert_eq!(v["totals"], serde_json::json!(["₹1.20 Cr", "₹1.30 Cr"]));
    assert_eq!(v["winner"]["title"], "Second");
    assert_eq!(v["rows"][1]["cells"][0]["absent"], true);
    assert_eq!(v["rows"][1]["cells"][1]["highest"], true);
}

#[test]
fn compare_hero_group_defaults_to_every_town() {
    let data = data_dir();
    let v = stdout_json(bo(data.path()).args(["compare", "--hero", "H1"]));
    assert_eq!(v["movie_count"], 2);
    assert_eq!(v["town_count"], 3);
    assert_eq!(v["scope_label"], "All territories");
}

#[test]
fn compare_writes_artifacts_and_reports() {
    let data = data_dir();
    let out = tempfile::tempdir().unwrap();
    bo(data.path())
        .args(["compare", "-m", "M1", "-m", "M2", "--territory", "NIZAM", "--render", "json", "html", "--out"])
        .arg(out.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("artifacts written"));

    let doc: Value = serde_json::from_slice(&fs::read(out.path().join("comparison.json")).unwrap()).unwrap();
    let run: Value = serde_json::from_slice(&fs::read(out.path().join("run_record.json")).unwrap()).unwrap();
    assert_eq!(doc["territory"], "NIZAM");
    assert_eq!(run["command"], "compare");
    assert_eq!(run["outputs"][0]["id"], doc["id"]);
    assert_eq!(run["inputs"].as_array().unwrap().len(), 3);
    assert!(run["id"].as_str().unwrap().starts_with("RUN:"));

    let html = fs::read_to_string(out.path().join("report.html")).unwrap();
    assert!(html.contains("NIZAM"));
    assert!(out.path().join("report.json").exists());
}

#[test]
fn artifacts_are_identical_across_runs() {
    let data = data_dir();
    let (a, b) = (tempfile::tempdir().unwrap(), tempfile::tempdir().unwrap());
    for out in [&a, &b] {
        bo(data.path())
            .args(["--quiet", "top", "--limit", "3", "--out"])
            .arg(out.path())
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }
    for name in ["ranking.json", "run_record.json"] {
        assert_eq!(fs::read(a.path().join(name)).unwrap(), fs::read(b.path().join(name)).unwrap());
    }
}

#[test]
fn top_ranks_in_territory_order_with_feed_only_towns_last() {
    let data = data_dir();
    let v = stdout_json(bo(data.path()).args(["top", "--day", "day1", "--limit", "2"]));

    let towns: Vec<&str> = v["towns"].as_array().unwrap().iter().map(|t| t["town"].as_str().unwrap()).collect();
    assert_eq!(towns, ["Hyderabad", "Warangal", "Chennai", "Vizag"]);
    assert_eq!(v["towns"][0]["entries"][0]["title"], "First");
    assert_eq!(v["towns"][0]["entries"][1]["title"], "Second");
    assert_eq!(v["towns"][1]["entries"], serde_json::json!([]));
    assert_eq!(v["showing"], "Showing 4 of 4 towns");
}

#[test]
fn top_search_narrows_the_towns() {
    let data = data_dir();
    let v = stdout_json(bo(data.path()).args(["top", "--search", "RA"]));
    assert_eq!(v["showing"], "Showing 2 of 4 towns");
    let towns: Vec<&str> = v["towns"].as_array().unwrap().iter().map(|t| t["town"].as_str().unwrap()).collect();
    assert_eq!(towns, ["Hyderabad", "Warangal"]);
}

#[test]
fn unrecognized_day_yields_empty_towns() {
    let data = data_dir();
    let v = stdout_json(bo(data.path()).args(["top", "--day", "DAY9"]));
    assert!(v["towns"].as_array().unwrap().iter().all(|t| t["entries"] == serde_json::json!([])));
}

#[test]
fn catalog_lists_heroes_and_day_vocabularies() {
    let data = data_dir();
    let v = stdout_json(bo(data.path()).arg("catalog"));
    assert_eq!(v["heroes"][0]["hero_code"], "H1");
    assert_eq!(v["territories"][1]["label"], "TAMIL NADU");
    assert_eq!(v["comparison_days"].as_array().unwrap().len(), 7);
    assert_eq!(v["ranking_days"][4]["label"], "Day 5");
    assert_eq!(v["ranking_days"][5]["label"], "Week 1");
}

#[test]
fn validation_failures_exit_2() {
    let data = data_dir();
    bo(data.path())
        .args(["compare", "--town", "Hyderabad"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no movies selected"));
    bo(data.path())
        .args(["compare", "-m", "M9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown movie code: M9"));
    bo(data.path())
        .args(["top", "--limit", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("limit must be positive"));
    bo(data.path()).args(["top", "--day", "DAY 1"]).assert().code(2);
}

#[test]
fn missing_data_directory_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    bo(&dir.path().join("nowhere"))
        .arg("catalog")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn unusable_feeds_exit_4() {
    let dir = tempfile::tempdir().unwrap();
    write_feeds(dir.path(), "[]", TOWNS, COLLECTIONS);
    bo(dir.path())
        .arg("catalog")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("data unavailable"));

    write_feeds(dir.path(), HEROES, TOWNS, r#"{"DAY1": [{"movieCode": "M1", "collections": {"Hyderabad": "lots"}}]}"#);
    bo(dir.path()).args(["compare", "-m", "M1"]).assert().code(4);
}
