//! Rule set persistence across mining runs.

mod support;

use std::fs;
use std::sync::Arc;

use codemine::adapter::outbound::file::{CsvTransactionSource, JsonRuleStore, TransactionFormat};
use codemine::application::mining::{
    generate_rules, mine, MiningParams, RebuildPolicy, RuleBuilder, Startup,
};
use codemine::domain::RuleSet;
use codemine::error::{Error, StoreError};
use codemine::port::outbound::store::RuleStore;
use codemine::testkit::config::SCENARIO_A_CSV;
use proptest::prelude::*;
use tempfile::TempDir;

use support::assertions::{assert_same_rules, find_rule};
use support::generators::transaction_log;

struct Workspace {
    _dir: TempDir,
    store: Arc<JsonRuleStore>,
    builder: RuleBuilder,
    transactions: std::path::PathBuf,
}

fn workspace(csv: &str) -> Workspace {
    let dir = TempDir::new().unwrap();
    let transactions = dir.path().join("transactions.csv");
    fs::write(&transactions, csv).unwrap();

    let store = Arc::new(JsonRuleStore::new(dir.path().join("rules.json")));
    let source = Arc::new(CsvTransactionSource::new(
        transactions.clone(),
        TransactionFormat::OneHot,
    ));
    let params = MiningParams {
        min_support: 0.5,
        min_confidence: 0.6,
        ..MiningParams::default()
    };
    let builder = RuleBuilder::new(source, store.clone(), params);
    Workspace {
        _dir: dir,
        store,
        builder,
        transactions,
    }
}

#[test]
fn built_rules_survive_a_round_trip() {
    let ws = workspace(SCENARIO_A_CSV);
    let (built, report) = ws.builder.build().unwrap();

    let loaded = ws.store.load().unwrap();
    assert_eq!(loaded, built);
    assert_eq!(report.rules, 3);
    assert_eq!(find_rule(&loaded, &["A"], &["B"]).confidence, 0.75);

    let provenance = loaded.provenance().unwrap();
    assert_eq!(provenance.transactions, 4);
    assert_eq!(provenance.min_support, 0.5);
}

#[test]
fn rebuilding_unchanged_input_is_idempotent() {
    let ws = workspace(SCENARIO_A_CSV);
    let (first, _) = ws.builder.build().unwrap();
    let (second, _) = ws.builder.build().unwrap();
    assert_same_rules(&first, &second);
    assert_same_rules(&second, &ws.store.load().unwrap());
}

#[test]
fn reuse_does_not_read_the_transaction_log() {
    let ws = workspace(SCENARIO_A_CSV);
    ws.builder.build().unwrap();
    fs::remove_file(&ws.transactions).unwrap();

    match ws.builder.ensure(RebuildPolicy::Reuse).unwrap() {
        Startup::Loaded(rules) => assert_eq!(rules.len(), 3),
        Startup::Built { .. } => panic!("expected the stored rule set to be reused"),
    }
}

#[test]
fn corrupt_store_is_surfaced_and_left_in_place() {
    let ws = workspace(SCENARIO_A_CSV);
    fs::write(ws.store.path(), "{ not json").unwrap();

    let result = ws.builder.ensure(RebuildPolicy::Reuse);
    assert!(matches!(
        result,
        Err(Error::Store(StoreError::Corrupt { .. }))
    ));
    assert_eq!(fs::read_to_string(ws.store.path()).unwrap(), "{ not json");
}

#[test]
fn forced_rebuild_replaces_a_corrupt_store() {
    let ws = workspace(SCENARIO_A_CSV);
    fs::write(ws.store.path(), "{ not json").unwrap();

    let startup = ws.builder.ensure(RebuildPolicy::Rebuild).unwrap();
    assert!(matches!(startup, Startup::Built { .. }));
    assert_eq!(ws.store.load().unwrap().len(), 3);
}

#[test]
fn failed_rebuild_keeps_the_previous_rule_set() {
    let ws = workspace(SCENARIO_A_CSV);
    let (previous, _) = ws.builder.build().unwrap();

    // Invalid header makes the next run fail before anything is written.
    fs::write(&ws.transactions, "Code,A,B\n1,1,1\n").unwrap();
    assert!(ws.builder.build().is_err());
    assert_eq!(ws.store.load().unwrap(), previous);
}

#[test]
fn skipped_records_are_reported_and_excluded() {
    let csv = format!("{SCENARIO_A_CSV}5,1,x,0\n6,1\n");
    let ws = workspace(&csv);
    let (rules, report) = ws.builder.build().unwrap();

    assert_eq!(report.transactions, 4);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(rules.provenance().unwrap().skipped_records, 2);
    assert_eq!(rules.len(), 3);
}

#[test]
fn stored_file_is_versioned_json() {
    let ws = workspace(SCENARIO_A_CSV);
    ws.builder.build().unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ws.store.path()).unwrap()).unwrap();
    assert_eq!(raw["format_version"], 1);
    assert_eq!(raw["rule_count"], 3);
    assert_eq!(raw["rule_set"]["rules"].as_array().unwrap().len(), 3);
}

proptest! {
    #[test]
    fn stored_statistics_reload_bit_for_bit(log in transaction_log()) {
        let frequent = mine(&log, 0.05).unwrap();
        let rules = RuleSet::new(generate_rules(&frequent, 0.0).unwrap());

        let dir = TempDir::new().unwrap();
        let store = JsonRuleStore::new(dir.path().join("rules.json"));
        store.save(&rules).unwrap();
        let loaded = store.load().unwrap();

        prop_assert_eq!(loaded.len(), rules.len());
        for (saved, reloaded) in rules.iter().zip(loaded.iter()) {
            prop_assert_eq!(&saved.antecedent, &reloaded.antecedent);
            prop_assert_eq!(&saved.consequent, &reloaded.consequent);
            prop_assert_eq!(saved.support.to_bits(), reloaded.support.to_bits());
            prop_assert_eq!(saved.confidence.to_bits(), reloaded.confidence.to_bits());
            prop_assert_eq!(saved.lift.to_bits(), reloaded.lift.to_bits());
            prop_assert_eq!(
                saved.antecedent_support.to_bits(),
                reloaded.antecedent_support.to_bits()
            );
        }
    }
}
