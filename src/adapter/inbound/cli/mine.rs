//! Handler for `mine`.

use serde_json::json;

use super::output;
use crate::application::mining::builder::BuildReport;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_rule_builder;
use crate::infrastructure::config::settings::Config;

/// Skipped records listed individually before the rest are summarized.
const SKIPPED_SHOWN: usize = 5;

/// Execute `mine`: remine and atomically replace the stored rule set.
pub fn execute(config: &Config) -> Result<()> {
    let builder = build_rule_builder(config);
    output::header(env!("CARGO_PKG_VERSION"));

    let spinner = output::spinner(&format!(
        "Mining {}",
        config.transactions.path.display()
    ));
    let (_, report) = match builder.build() {
        Ok(built) => built,
        Err(e) => {
            output::spinner_fail(&spinner, "Rebuild failed; the stored rule set was not changed");
            return Err(e);
        }
    };
    output::spinner_success(&spinner, &format!("Stored {} rules", report.rules));

    if output::is_json() {
        output::json_output(json!({
            "command": "mine",
            "report": report,
        }));
        return Ok(());
    }

    print_report(config, &report);
    Ok(())
}

fn print_report(config: &Config, report: &BuildReport) {
    output::section("Rule Set");
    output::field("Store", &report.location);
    output::field("Transactions", report.transactions);
    output::field("Itemsets", report.frequent_itemsets);
    output::field("Rules", report.rules);
    output::field("Min support", config.mining.min_support);
    output::field("Min confidence", config.mining.min_confidence);
    output::field("Elapsed", format!("{}ms", report.elapsed_ms));

    if !report.skipped.is_empty() {
        output::section("Skipped Records");
        output::warning(&format!(
            "{} malformed records were skipped",
            report.skipped.len()
        ));
        for record in report.skipped.iter().take(SKIPPED_SHOWN) {
            output::note(&format!("line {}: {}", record.line, record.reason));
        }
        if report.skipped.len() > SKIPPED_SHOWN {
            output::note(&format!(
                "... and {} more (see warn logs)",
                report.skipped.len() - SKIPPED_SHOWN
            ));
        }
    }

    if report.rules == 0 {
        output::hint("no rules met the thresholds; try a lower min_support or min_confidence");
    }
}
