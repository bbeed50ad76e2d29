//! Handlers for `rules show` and `rules check`.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::domain::{Rule, RuleSet};
use crate::error::Result;
use crate::infrastructure::bootstrap::build_rule_store;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "If")]
    antecedent: String,
    #[tabled(rename = "Then")]
    consequent: String,
    #[tabled(rename = "Support")]
    support: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Lift")]
    lift: String,
}

impl From<&Rule> for RuleRow {
    fn from(rule: &Rule) -> Self {
        Self {
            antecedent: output::codes(&rule.antecedent.to_strings()),
            consequent: output::codes(&rule.consequent.to_strings()),
            support: format!("{:.3}", rule.support),
            confidence: format!("{:.3}", rule.confidence),
            lift: format!("{:.3}", rule.lift),
        }
    }
}

/// Render rules as a table.
pub(super) fn rule_table<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> String {
    Table::new(rules.into_iter().map(RuleRow::from)).to_string()
}

fn print_provenance(rules: &RuleSet) {
    let Some(provenance) = rules.provenance() else {
        return;
    };
    output::field(
        "Built",
        provenance.built_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    output::field("Transactions", provenance.transactions);
    if provenance.skipped_records > 0 {
        output::field("Skipped", provenance.skipped_records);
    }
    output::field("Min support", provenance.min_support);
    output::field("Min confidence", provenance.min_confidence);
}

/// Execute `rules show`.
pub fn execute_show(config: &Config, limit: Option<usize>) -> Result<()> {
    let store = build_rule_store(config);
    let rules = store.load()?;
    let shown = limit.unwrap_or(rules.len()).min(rules.len());

    if output::is_json() {
        output::json_output(json!({
            "command": "rules.show",
            "location": store.location(),
            "total": rules.len(),
            "provenance": rules.provenance(),
            "rules": &rules.rules()[..shown],
        }));
        return Ok(());
    }

    output::section("Rule Set");
    output::field("Store", store.location());
    output::field("Rules", rules.len());
    print_provenance(&rules);

    if rules.is_empty() {
        output::warning("Rule set is empty; lower min_support or min_confidence and re-mine");
        return Ok(());
    }

    output::section("Rules");
    output::lines(&rule_table(rules.iter().take(shown)));
    if shown < rules.len() {
        output::hint(&format!(
            "{} more; pass {} to see them",
            rules.len() - shown,
            output::highlight("--limit")
        ));
    }
    Ok(())
}

/// Execute `rules check`.
pub fn execute_check(config: &Config) -> Result<()> {
    let store = build_rule_store(config);
    let rules = store.load()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "rules.check",
            "location": store.location(),
            "valid": true,
            "rules": rules.len(),
        }));
        return Ok(());
    }

    output::section("Rule Set Check");
    output::field("Store", store.location());
    output::success(&format!("{} rules loaded and valid", rules.len()));
    print_provenance(&rules);
    Ok(())
}
