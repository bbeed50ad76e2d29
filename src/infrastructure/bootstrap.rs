//! Composition root: builds adapters and services from configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::file::{CsvTransactionSource, JsonRuleStore};
use crate::application::mining::builder::{RebuildPolicy, RuleBuilder, Startup};
use crate::application::recommend::service::RecommendationService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::RuleStore;
use crate::port::outbound::transactions::TransactionSource;

/// Build the transaction source named in the configuration.
pub fn build_transaction_source(config: &Config) -> Arc<dyn TransactionSource> {
    Arc::new(CsvTransactionSource::new(
        config.transactions.path.clone(),
        config.transactions.format,
    ))
}

/// Build the rule store named in the configuration.
pub fn build_rule_store(config: &Config) -> Arc<dyn RuleStore> {
    Arc::new(JsonRuleStore::new(config.store.path.clone()))
}

/// Build the mining pipeline.
pub fn build_rule_builder(config: &Config) -> RuleBuilder {
    RuleBuilder::new(
        build_transaction_source(config),
        build_rule_store(config),
        config.mining.to_params(),
    )
}

/// Obtain the rule set according to `policy` and wrap it in a serving
/// service.
///
/// # Errors
///
/// Propagates store and build failures; a corrupt store is never replaced
/// by an empty rule set.
pub fn prepare_service(
    config: &Config,
    policy: RebuildPolicy,
) -> Result<(RecommendationService, Startup)> {
    let builder = build_rule_builder(config);
    let startup = builder.ensure(policy)?;

    let rules = match &startup {
        Startup::Loaded(rules) | Startup::Built { rules, .. } => rules.clone(),
    };
    info!(
        rules = rules.len(),
        policy = ?policy,
        "Recommendation service ready"
    );

    let service = RecommendationService::new(rules)
        .with_coverage_examples(config.recommend.coverage_examples);
    Ok((service, startup))
}
