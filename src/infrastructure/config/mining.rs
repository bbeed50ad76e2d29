//! Mining thresholds and budget.

use serde::{Deserialize, Serialize};

use crate::application::mining::apriori::{MiningLimits, DEFAULT_MAX_CANDIDATES};
use crate::application::mining::builder::MiningParams;

/// `[mining]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Minimum fraction of transactions an itemset must appear in.
    ///
    /// Must be in (0, 1]. Defaults to 0.05.
    #[serde(default = "default_min_support")]
    pub min_support: f64,

    /// Minimum confidence for a rule to be kept.
    ///
    /// Must be in [0, 1]. Defaults to 0.6.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    /// Largest itemset size to enumerate. Unlimited when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_itemset_len: Option<usize>,

    /// Candidate count per level above which a run is aborted.
    ///
    /// Defaults to 1,000,000.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: default_min_support(),
            min_confidence: default_min_confidence(),
            max_itemset_len: None,
            max_candidates: default_max_candidates(),
        }
    }
}

impl MiningConfig {
    /// Convert to the build pipeline's parameters.
    #[must_use]
    pub fn to_params(&self) -> MiningParams {
        MiningParams {
            min_support: self.min_support,
            min_confidence: self.min_confidence,
            limits: MiningLimits {
                max_itemset_len: self.max_itemset_len,
                max_candidates: self.max_candidates,
            },
        }
    }
}

fn default_min_support() -> f64 {
    0.05
}

fn default_min_confidence() -> f64 {
    0.6
}

fn default_max_candidates() -> usize {
    DEFAULT_MAX_CANDIDATES
}
