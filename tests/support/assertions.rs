use codemine::domain::{Rule, RuleSet};

pub fn assert_near(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Find the rule `antecedent -> consequent`, panicking if it is absent.
pub fn find_rule<'a>(rules: &'a RuleSet, antecedent: &[&str], consequent: &[&str]) -> &'a Rule {
    rules
        .iter()
        .find(|rule| {
            rule.antecedent.to_strings() == antecedent
                && rule.consequent.to_strings() == consequent
        })
        .unwrap_or_else(|| panic!("no rule {antecedent:?} -> {consequent:?}"))
}

/// Rule sets compared without their provenance timestamps.
pub fn assert_same_rules(left: &RuleSet, right: &RuleSet) {
    assert_eq!(left.rules(), right.rules());
}
