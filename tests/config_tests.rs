use std::fs;
use std::path::PathBuf;

use codemine::adapter::outbound::file::TransactionFormat;
use codemine::application::mining::RebuildPolicy;
use codemine::error::{ConfigError, Error};
use codemine::infrastructure::config::settings::Config;
use codemine::testkit::config::{in_dir, write_config};
use tempfile::TempDir;

fn write_temp_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("codemine.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_rejects_zero_min_support() {
    let dir = TempDir::new().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[mining]
min_support = 0.0
min_confidence = 0.6
"#,
    );

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "min_support",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid min_support error, got {err}"),
        Ok(_) => panic!("Expected invalid min_support error, got Ok"),
    }
}

#[test]
fn config_rejects_confidence_above_one() {
    let dir = TempDir::new().unwrap();
    let path = write_temp_config(&dir, "[mining]\nmin_confidence = 1.5\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "min_confidence",
            ..
        }))
    ));
}

#[test]
fn config_rejects_empty_store_path() {
    let dir = TempDir::new().unwrap();
    let path = write_temp_config(&dir, "[store]\npath = \"\"\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::MissingField {
            field: "store.path"
        }))
    ));
}

#[test]
fn config_rejects_unknown_logging_format() {
    let dir = TempDir::new().unwrap();
    let path = write_temp_config(&dir, "[logging]\nformat = \"xml\"\n");
    assert!(Config::load(&path).is_err());
}

#[test]
fn config_reports_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = write_temp_config(&dir, "[mining\nmin_support = ");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_reports_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Config::load(dir.path().join("absent.toml")),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn partial_config_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_temp_config(
        &dir,
        r#"
[transactions]
path = "data/baskets.csv"
format = "basket"

[store]
rebuild = "rebuild"
"#,
    );

    let config = Config::load(&path).unwrap();
    assert_eq!(config.transactions.path, PathBuf::from("data/baskets.csv"));
    assert_eq!(config.transactions.format, TransactionFormat::Basket);
    assert_eq!(config.store.rebuild, RebuildPolicy::Rebuild);
    assert_eq!(config.store.path, PathBuf::from("association_rules.json"));
    assert_eq!(config.mining.min_support, 0.05);
    assert_eq!(config.mining.min_confidence, 0.6);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn written_config_loads_back_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut config = in_dir(dir.path());
    config.mining.max_itemset_len = Some(3);
    config.recommend.coverage_examples = 7;

    let path = dir.path().join("roundtrip.toml");
    write_config(&config, &path);
    assert_eq!(Config::load(&path).unwrap(), config);
}
