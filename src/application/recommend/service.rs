//! Recommendation service: validation, matching and response mapping.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{Query, QueryError, Rule, RuleSet};
use crate::error::StoreError;
use crate::port::inbound::recommend::{RecommendationResponse, Recommender, NO_APPLICABLE_RULE};
use crate::port::outbound::store::RuleStore;

use super::engine::{applicable_rules, recommend};
use super::shared::SharedRuleSet;

/// Default number of covered inputs suggested with a "no recommendation"
/// answer.
pub const DEFAULT_COVERAGE_EXAMPLES: usize = 3;

/// Serves recommendations from an in-memory rule set.
///
/// The rule set is passed in explicitly; the service never reads storage on
/// its own. [`RecommendationService::reload`] swaps in a freshly loaded rule
/// set without disturbing requests in flight.
pub struct RecommendationService {
    rules: SharedRuleSet,
    coverage_examples: usize,
}

impl RecommendationService {
    /// Create a service over `rules`.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules: SharedRuleSet::new(rules),
            coverage_examples: DEFAULT_COVERAGE_EXAMPLES,
        }
    }

    /// Set how many covered inputs accompany a "no recommendation" answer.
    #[must_use]
    pub fn with_coverage_examples(mut self, count: usize) -> Self {
        self.coverage_examples = count;
        self
    }

    /// Snapshot of the rule set being served.
    #[must_use]
    pub fn rules(&self) -> Arc<RuleSet> {
        self.rules.snapshot()
    }

    /// Match a validated query.
    #[must_use]
    pub fn respond(&self, query: &Query) -> RecommendationResponse {
        let rules = self.rules.snapshot();
        match recommend(query, &rules) {
            Ok(codes) => RecommendationResponse::Recommended {
                query: query.to_strings(),
                codes: codes.into_iter().map(String::from).collect(),
            },
            Err(outcome) => {
                debug!(query = ?query.to_strings(), reason = %outcome.reason, "No recommendation");
                RecommendationResponse::NoRecommendation {
                    query: query.to_strings(),
                    reason_code: NO_APPLICABLE_RULE,
                    reason: outcome.reason,
                    examples: rules
                        .coverage_examples(self.coverage_examples)
                        .iter()
                        .map(|itemset| itemset.to_strings())
                        .collect(),
                }
            }
        }
    }

    /// Rules that fire for `query`, cloned from the current snapshot.
    #[must_use]
    pub fn matching_rules(&self, query: &Query) -> Vec<Rule> {
        let rules = self.rules.snapshot();
        applicable_rules(query, &rules).cloned().collect()
    }

    /// Reload the rule set from `store` and swap it in.
    ///
    /// On error the current rule set keeps being served.
    ///
    /// # Errors
    ///
    /// Propagates the store's load error.
    pub fn reload(&self, store: &dyn RuleStore) -> Result<usize, StoreError> {
        let rules = store.load()?;
        let count = rules.len();
        self.rules.replace(rules);
        info!(rules = count, location = %store.location(), "Rule set reloaded");
        Ok(count)
    }
}

impl Recommender for RecommendationService {
    fn recommend(&self, codes: &[String]) -> Result<RecommendationResponse, QueryError> {
        let query = Query::parse(codes)?;
        Ok(self.respond(&query))
    }
}
