//! Rule matching.
//!
//! A rule applies when its antecedent is a subset of the query. The
//! recommendation is the union of the consequents of every applicable rule,
//! minus the codes the caller already has. Rules are not ranked: overlapping
//! rules simply contribute to the same union.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::domain::{Code, Query, Rule, RuleSet};
use crate::port::inbound::recommend::NoRecommendationReason;

/// The rule base has no answer for a query.
///
/// This is an expected outcome, not a fault.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no applicable rule: {reason}")]
pub struct NoApplicableRule {
    pub reason: NoRecommendationReason,
}

/// Rules whose antecedent is contained in `query`, in rule set order.
pub fn applicable_rules<'a>(
    query: &'a Query,
    rules: &'a RuleSet,
) -> impl Iterator<Item = &'a Rule> + 'a {
    rules.iter().filter(move |rule| rule.applies_to(query.codes()))
}

/// Recommend codes for `query`.
///
/// # Errors
///
/// Returns [`NoApplicableRule`] when no rule applies, or when every code the
/// applicable rules point to is already in the query.
pub fn recommend(query: &Query, rules: &RuleSet) -> Result<BTreeSet<Code>, NoApplicableRule> {
    let mut matched = false;
    let mut recommended = BTreeSet::new();

    for rule in applicable_rules(query, rules) {
        matched = true;
        recommended.extend(
            rule.consequent
                .iter()
                .filter(|code| !query.contains(code))
                .cloned(),
        );
    }

    if !matched {
        return Err(NoApplicableRule {
            reason: NoRecommendationReason::NoMatchingRule,
        });
    }
    if recommended.is_empty() {
        return Err(NoApplicableRule {
            reason: NoRecommendationReason::AlreadyCovered,
        });
    }
    Ok(recommended)
}
