//! Canonical test configurations.
//!
//! Single source of truth for the files and config used by tests that go
//! through the real CSV reader and JSON store.

use std::fs;
use std::path::Path;

use crate::infrastructure::config::settings::Config;

/// Scenario A as a one-hot log: `{A,B}, {A,B}, {A,C}, {A,B,C}`.
pub const SCENARIO_A_CSV: &str = "\
Transaction_ID,A,B,C
1,1,1,0
2,1,1,0
3,1,0,1
4,1,1,1
";

/// Config whose transaction log and rule store live under `dir`.
///
/// Thresholds are Scenario A's: `min_support = 0.5`, `min_confidence = 0.6`.
pub fn in_dir(dir: &Path) -> Config {
    let mut config = Config::default();
    config.transactions.path = dir.join("transactions.csv");
    config.store.path = dir.join("association_rules.json");
    config.mining.min_support = 0.5;
    config.mining.min_confidence = 0.6;
    config
}

/// Write `content` as the transaction log named by `config`.
pub fn write_transactions(config: &Config, content: &str) {
    fs::write(&config.transactions.path, content).expect("write test transactions");
}

/// Render `config` as TOML and write it to `path`.
pub fn write_config(config: &Config, path: &Path) {
    let toml = config.to_toml().expect("serialize test config");
    fs::write(path, toml).expect("write test config");
}
