//! Offline phase: frequent itemsets, rule generation and the build pipeline.

pub mod apriori;
pub mod builder;
pub mod rules;

pub use apriori::{mine, mine_with_limits, FrequentItemsets, MiningLimits};
pub use builder::{BuildReport, MiningParams, RebuildPolicy, RuleBuilder, Startup};
pub use rules::generate_rules;
