//! CLI integration tests.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use codemine::testkit::config::{in_dir, write_config, write_transactions, SCENARIO_A_CSV};
use predicates::prelude::*;
use tempfile::TempDir;

struct Project {
    dir: TempDir,
    config: PathBuf,
    store: PathBuf,
}

fn project() -> Project {
    let dir = TempDir::new().unwrap();
    let config = in_dir(dir.path());
    write_transactions(&config, SCENARIO_A_CSV);
    let config_path = dir.path().join("codemine.toml");
    write_config(&config, &config_path);
    Project {
        store: config.store.path.clone(),
        dir,
        config: config_path,
    }
}

fn codemine(project: &Project) -> Command {
    let mut cmd = cargo_bin_cmd!("codemine");
    cmd.current_dir(project.dir.path())
        .env_remove("CODEMINE_CONFIG")
        .env("RUST_LOG", "error")
        .arg("--color")
        .arg("never")
        .arg("-c")
        .arg(&project.config);
    cmd
}

#[test]
fn test_help() {
    cargo_bin_cmd!("codemine")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mine"))
        .stdout(predicate::str::contains("recommend"))
        .stdout(predicate::str::contains("rules"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("codemine")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("codemine"));
}

#[test]
fn test_mine_writes_the_store() {
    let project = project();
    codemine(&project)
        .arg("mine")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rules"));
    assert!(project.store.exists());
}

#[test]
fn test_mine_json_reports_counts() {
    let project = project();
    let output = codemine(&project)
        .args(["--json", "mine"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let last = String::from_utf8(output).unwrap();
    let report: serde_json::Value = serde_json::from_str(last.lines().last().unwrap()).unwrap();
    assert_eq!(report["command"], "mine");
    assert_eq!(report["report"]["rules"], 3);
    assert_eq!(report["report"]["transactions"], 4);
}

#[test]
fn test_recommend_mines_on_first_use() {
    let project = project();
    codemine(&project)
        .args(["recommend", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B"));
    assert!(project.store.exists());
}

#[test]
fn test_recommend_accepts_quoted_multi_code_query() {
    let project = project();
    codemine(&project)
        .args(["recommend", "B C"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?m)^A$").unwrap());
}

#[test]
fn test_recommend_hint_pastes_back_as_query() {
    let project = project();
    let mut config = in_dir(project.dir.path());
    config.recommend.coverage_examples = 10;
    write_config(&config, &project.config);

    codemine(&project)
        .args(["recommend", "Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("covered inputs include: "))
        .stdout(predicate::str::contains(",").not());
}

#[test]
fn test_recommend_unknown_code_is_not_an_error() {
    let project = project();
    codemine(&project)
        .args(["recommend", "Z"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("No recommendation"));
}

#[test]
fn test_recommend_duplicate_code_exits_with_two() {
    let project = project();
    codemine(&project)
        .args(["recommend", "A", "A"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid query"));
}

#[test]
fn test_recommend_json_no_recommendation() {
    let project = project();
    codemine(&project)
        .args(["--json", "recommend", "Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reason_code\":\"no_applicable_rule\""));
}

#[test]
fn test_recommend_stdin_continues_past_bad_lines() {
    let project = project();
    codemine(&project)
        .args(["--json", "recommend", "--stdin"])
        .write_stdin("A\nA A\nZ\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"recommended\""))
        .stdout(predicate::str::contains("\"status\":\"invalid_query\""))
        .stdout(predicate::str::contains("\"status\":\"no_recommendation\""));
}

#[test]
fn test_recommend_explain_lists_rules() {
    let project = project();
    codemine(&project)
        .args(["recommend", "--explain", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confidence"))
        .stdout(predicate::str::contains("0.750"));
}

#[test]
fn test_corrupt_store_fails_without_rebuild() {
    let project = project();
    fs::write(&project.store, "not json").unwrap();

    codemine(&project)
        .args(["recommend", "A"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("corrupt"));
    assert_eq!(fs::read_to_string(&project.store).unwrap(), "not json");

    codemine(&project)
        .args(["recommend", "--rebuild", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("B"));
}

#[test]
fn test_rules_show_without_store_fails() {
    let project = project();
    codemine(&project)
        .args(["rules", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("codemine mine"));
}

#[test]
fn test_rules_show_and_check_after_mining() {
    let project = project();
    codemine(&project).arg("mine").assert().success();

    codemine(&project)
        .args(["rules", "show", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("If"))
        .stdout(predicate::str::contains("--limit"));

    codemine(&project)
        .args(["rules", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 rules loaded and valid"));
}

#[test]
fn test_threshold_override_is_validated() {
    let project = project();
    codemine(&project)
        .args(["mine", "--min-support", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("min_support"));
}

#[test]
fn test_config_init_and_validate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.toml");

    cargo_bin_cmd!("codemine")
        .current_dir(dir.path())
        .env_remove("CODEMINE_CONFIG")
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    cargo_bin_cmd!("codemine")
        .current_dir(dir.path())
        .env_remove("CODEMINE_CONFIG")
        .arg("-c")
        .arg(&path)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("codemine")
        .current_dir(dir.path())
        .arg("-c")
        .arg(dir.path().join("nope.toml"))
        .arg("mine")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config"));
}
