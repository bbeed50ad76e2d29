//! Offline mining: frequent itemsets and rule generation end to end.

mod support;

use codemine::application::mining::{generate_rules, mine, mine_with_limits, MiningLimits};
use codemine::domain::RuleSet;
use codemine::error::MiningError;
use codemine::testkit::domain::{itemset, scenario_a, transactions};
use proptest::prelude::*;

use support::assertions::{assert_near, find_rule};
use support::generators::transaction_log;

#[test]
fn scenario_a_frequent_itemsets() {
    let frequent = mine(&scenario_a(), 0.5).unwrap();

    assert_eq!(frequent.transaction_count(), 4);
    assert_eq!(frequent.support(&itemset(&["A"])), Some(1.0));
    assert_eq!(frequent.support(&itemset(&["B"])), Some(0.75));
    assert_eq!(frequent.support(&itemset(&["C"])), Some(0.5));
    assert_eq!(frequent.support(&itemset(&["A", "B"])), Some(0.75));
    assert_eq!(frequent.support(&itemset(&["A", "C"])), Some(0.5));
    assert!(!frequent.contains(&itemset(&["B", "C"])));
    assert!(!frequent.contains(&itemset(&["A", "B", "C"])));
    assert_eq!(frequent.len(), 5);
}

#[test]
fn scenario_a_rules() {
    let frequent = mine(&scenario_a(), 0.5).unwrap();
    let rules = RuleSet::new(generate_rules(&frequent, 0.6).unwrap());

    let a_to_b = find_rule(&rules, &["A"], &["B"]);
    assert_near(a_to_b.confidence, 0.75, 1e-12);
    assert_near(a_to_b.support, 0.75, 1e-12);
    assert_near(a_to_b.lift, 1.0, 1e-12);

    assert_near(find_rule(&rules, &["B"], &["A"]).confidence, 1.0, 1e-12);
    assert_near(find_rule(&rules, &["C"], &["A"]).confidence, 1.0, 1e-12);
    // A -> C has confidence 0.5.
    assert_eq!(rules.len(), 3);
}

#[test]
fn scenario_d_empty_log_yields_empty_results() {
    let frequent = mine(&[], 0.5).unwrap();
    assert!(frequent.is_empty());

    let rules = generate_rules(&frequent, 0.6).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn support_threshold_is_inclusive() {
    let log = transactions(&[&["A", "B"], &["A"], &["B"], &["C"]]);
    let frequent = mine(&log, 0.25).unwrap();
    assert!(frequent.contains(&itemset(&["A", "B"])));
    assert!(frequent.contains(&itemset(&["C"])));
}

#[test]
fn max_itemset_len_stops_enumeration() {
    let limits = MiningLimits {
        max_itemset_len: Some(1),
        ..MiningLimits::default()
    };
    let frequent = mine_with_limits(&scenario_a(), 0.5, &limits).unwrap();
    assert_eq!(frequent.max_len(), 1);
    assert!(generate_rules(&frequent, 0.0).unwrap().is_empty());
}

#[test]
fn candidate_budget_aborts_the_run() {
    let log = transactions(&[&["A", "B", "C", "D"], &["A", "B", "C", "D"]]);
    let limits = MiningLimits {
        max_itemset_len: None,
        max_candidates: 2,
    };
    assert!(matches!(
        mine_with_limits(&log, 0.5, &limits),
        Err(MiningError::CandidateBudgetExceeded { .. })
    ));
}

#[test]
fn out_of_range_thresholds_are_rejected() {
    assert!(matches!(
        mine(&scenario_a(), 0.0),
        Err(MiningError::InvalidThreshold { .. })
    ));
    assert!(matches!(
        mine(&scenario_a(), 1.5),
        Err(MiningError::InvalidThreshold { .. })
    ));
    let frequent = mine(&scenario_a(), 0.5).unwrap();
    assert!(matches!(
        generate_rules(&frequent, -0.1),
        Err(MiningError::InvalidThreshold { .. })
    ));
}

#[test]
fn mining_is_deterministic() {
    let first = RuleSet::new(generate_rules(&mine(&scenario_a(), 0.25).unwrap(), 0.3).unwrap());
    let second = RuleSet::new(generate_rules(&mine(&scenario_a(), 0.25).unwrap(), 0.3).unwrap());
    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn supports_are_exact_counts(log in transaction_log(), min_support in 0.05f64..=1.0) {
        let frequent = mine(&log, min_support).unwrap();
        for (set, support) in frequent.iter() {
            let count = log.iter().filter(|t| t.contains_all(set)).count();
            prop_assert_eq!(support, count as f64 / log.len() as f64);
            prop_assert!(support >= min_support);
        }
    }

    #[test]
    fn frequent_itemsets_are_downward_closed(log in transaction_log(), min_support in 0.05f64..=1.0) {
        let frequent = mine(&log, min_support).unwrap();
        for (set, support) in frequent.iter() {
            for code in set.iter() {
                if let Some(subset) = set.without(code) {
                    let subset_support = frequent.support(&subset);
                    prop_assert!(subset_support.is_some(), "{:?} missing", subset);
                    prop_assert!(subset_support.unwrap() >= support);
                }
            }
        }
    }

    #[test]
    fn rule_statistics_follow_their_definitions(
        log in transaction_log(),
        min_support in 0.05f64..=1.0,
        min_confidence in 0.0f64..=1.0,
    ) {
        let frequent = mine(&log, min_support).unwrap();
        for rule in generate_rules(&frequent, min_confidence).unwrap() {
            prop_assert!(rule.antecedent.is_disjoint(&rule.consequent));
            prop_assert!(rule.confidence >= min_confidence);
            prop_assert!(rule.confidence <= 1.0);
            prop_assert!(rule.support >= min_support);

            let union = rule.antecedent.union(&rule.consequent);
            prop_assert_eq!(frequent.support(&union), Some(rule.support));
            prop_assert_eq!(frequent.support(&rule.antecedent), Some(rule.antecedent_support));
            prop_assert!((rule.confidence - rule.support / rule.antecedent_support).abs() < 1e-12);
            prop_assert!((rule.lift - rule.confidence / rule.consequent_support).abs() < 1e-9);
        }
    }
}
