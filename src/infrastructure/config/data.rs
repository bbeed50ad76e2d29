//! Data locations: the transaction log, the rule store and serving options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::file::TransactionFormat;
use crate::application::mining::builder::RebuildPolicy;
use crate::application::recommend::service::DEFAULT_COVERAGE_EXAMPLES;

/// `[transactions]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsConfig {
    /// Path of the transaction CSV.
    #[serde(default = "default_transactions_path")]
    pub path: PathBuf,

    /// File layout, `one_hot` or `basket`.
    #[serde(default)]
    pub format: TransactionFormat,
}

impl Default for TransactionsConfig {
    fn default() -> Self {
        Self {
            path: default_transactions_path(),
            format: TransactionFormat::default(),
        }
    }
}

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the rule set file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Startup policy for an existing rule set.
    #[serde(default)]
    pub rebuild: RebuildPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            rebuild: RebuildPolicy::default(),
        }
    }
}

/// `[recommend]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Covered inputs listed alongside a "no recommendation" answer.
    #[serde(default = "default_coverage_examples")]
    pub coverage_examples: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            coverage_examples: default_coverage_examples(),
        }
    }
}

fn default_transactions_path() -> PathBuf {
    PathBuf::from("codes/transactions.csv")
}

fn default_store_path() -> PathBuf {
    PathBuf::from("association_rules.json")
}

fn default_coverage_examples() -> usize {
    DEFAULT_COVERAGE_EXAMPLES
}
