//! Rule set build pipeline.
//!
//! Loads the transaction log, mines frequent itemsets, derives rules and
//! persists the result. A run either stores a complete rule set or fails
//! and leaves the previous one untouched.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::apriori::{mine_with_limits, MiningLimits};
use super::rules::generate_rules;
use crate::domain::{Provenance, RuleSet, SkippedRecord};
use crate::error::{Result, StoreError};
use crate::port::outbound::store::RuleStore;
use crate::port::outbound::transactions::TransactionSource;

/// Thresholds and budget for a mining run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningParams {
    pub min_support: f64,
    pub min_confidence: f64,
    pub limits: MiningLimits,
}

impl Default for MiningParams {
    fn default() -> Self {
        Self {
            min_support: 0.05,
            min_confidence: 0.6,
            limits: MiningLimits::default(),
        }
    }
}

/// What to do with an existing rule store at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebuildPolicy {
    /// Serve the stored rule set if there is one; mine only when none exists.
    #[default]
    Reuse,
    /// Mine a fresh rule set and replace the stored one.
    Rebuild,
}

/// Summary of a completed mining run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildReport {
    pub transactions: usize,
    pub skipped: Vec<SkippedRecord>,
    pub frequent_itemsets: usize,
    pub rules: usize,
    pub location: String,
    pub elapsed_ms: u64,
}

/// Rule set obtained at startup.
#[derive(Debug)]
pub enum Startup {
    /// An existing rule set was loaded from the store.
    Loaded(RuleSet),
    /// A fresh rule set was mined and stored.
    Built { rules: RuleSet, report: BuildReport },
}

impl Startup {
    /// The rule set, however it was obtained.
    #[must_use]
    pub fn into_rules(self) -> RuleSet {
        match self {
            Self::Loaded(rules) | Self::Built { rules, .. } => rules,
        }
    }
}

/// Runs the build pipeline against a transaction source and a rule store.
pub struct RuleBuilder {
    source: Arc<dyn TransactionSource>,
    store: Arc<dyn RuleStore>,
    params: MiningParams,
}

impl RuleBuilder {
    pub fn new(
        source: Arc<dyn TransactionSource>,
        store: Arc<dyn RuleStore>,
        params: MiningParams,
    ) -> Self {
        Self {
            source,
            store,
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &MiningParams {
        &self.params
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn RuleStore> {
        &self.store
    }

    /// Mine a fresh rule set and atomically replace the stored one.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable transaction source, invalid thresholds, an
    /// exceeded candidate budget, or a store write failure. In every case
    /// the previously stored rule set is left as it was.
    pub fn build(&self) -> Result<(RuleSet, BuildReport)> {
        let started = Instant::now();
        let log = self.source.load()?;
        if !log.skipped.is_empty() {
            warn!(
                skipped = log.skipped.len(),
                source = %self.source.location(),
                "Malformed transaction records were skipped"
            );
        }

        let frequent = mine_with_limits(
            &log.transactions,
            self.params.min_support,
            &self.params.limits,
        )?;
        let rules = generate_rules(&frequent, self.params.min_confidence)?;

        let provenance = Provenance {
            min_support: self.params.min_support,
            min_confidence: self.params.min_confidence,
            transactions: log.len(),
            skipped_records: log.skipped.len(),
            frequent_itemsets: frequent.len(),
            built_at: Utc::now(),
        };
        let rule_set = RuleSet::new(rules).with_provenance(provenance);

        self.store.save(&rule_set)?;

        let report = BuildReport {
            transactions: log.len(),
            skipped: log.skipped,
            frequent_itemsets: frequent.len(),
            rules: rule_set.len(),
            location: self.store.location(),
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        info!(
            transactions = report.transactions,
            frequent_itemsets = report.frequent_itemsets,
            rules = report.rules,
            elapsed_ms = report.elapsed_ms,
            "Rule set built"
        );
        Ok((rule_set, report))
    }

    /// Obtain the rule set to serve according to `policy`.
    ///
    /// Under [`RebuildPolicy::Reuse`] a stored rule set is loaded as is and a
    /// missing one is mined. [`RebuildPolicy::Rebuild`] ignores the store and
    /// always mines; the stored rule set is replaced only once the new one is
    /// saved, so a failed rebuild leaves it in place.
    ///
    /// # Errors
    ///
    /// A corrupt store is returned as an error, never replaced silently.
    /// Build failures propagate as for [`RuleBuilder::build`].
    pub fn ensure(&self, policy: RebuildPolicy) -> Result<Startup> {
        match policy {
            RebuildPolicy::Reuse => match self.store.load() {
                Ok(rules) => {
                    info!(
                        rules = rules.len(),
                        location = %self.store.location(),
                        "Reusing stored rule set"
                    );
                    Ok(Startup::Loaded(rules))
                }
                Err(StoreError::NotFound { .. }) => {
                    info!(location = %self.store.location(), "No stored rule set, mining");
                    self.build_startup()
                }
                Err(e) => Err(e.into()),
            },
            RebuildPolicy::Rebuild => {
                info!(location = %self.store.location(), "Rebuild requested, mining");
                self.build_startup()
            }
        }
    }

    fn build_startup(&self) -> Result<Startup> {
        let (rules, report) = self.build()?;
        Ok(Startup::Built { rules, report })
    }
}
