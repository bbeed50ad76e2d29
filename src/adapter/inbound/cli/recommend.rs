//! Handler for `recommend`.

use std::io::{self, BufRead};

use serde_json::json;
use tracing::{debug, warn};

use super::command::RecommendArgs;
use super::output;
use super::rules::rule_table;
use crate::application::mining::builder::{RebuildPolicy, Startup};
use crate::application::recommend::service::RecommendationService;
use crate::domain::{Query, QueryError};
use crate::error::Result;
use crate::infrastructure::bootstrap::prepare_service;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::recommend::{RecommendationResponse, Recommender};

/// Execute `recommend`.
///
/// A malformed query fails the command; "no recommendation" is a normal
/// answer. With `--stdin` each input line is answered independently and a
/// malformed line is reported without stopping the rest.
pub fn execute(config: &Config, args: &RecommendArgs) -> Result<()> {
    let policy = if args.rebuild {
        RebuildPolicy::Rebuild
    } else {
        config.store.rebuild
    };

    let spinner = output::spinner("Loading rule set");
    let (service, startup) = match prepare_service(config, policy) {
        Ok(prepared) => prepared,
        Err(e) => {
            output::spinner_fail(&spinner, "Rule set unavailable");
            return Err(e);
        }
    };
    let message = match &startup {
        Startup::Loaded(rules) => format!("Loaded {} rules", rules.len()),
        Startup::Built { report, .. } => format!("Mined {} rules", report.rules),
    };
    output::spinner_success(&spinner, &message);

    if args.stdin {
        let summary = answer_lines(&service, io::stdin().lock(), args.explain)?;
        if summary.invalid > 0 {
            output::warning(&format!(
                "{} of {} queries were malformed",
                summary.invalid, summary.answered
            ));
        }
        return Ok(());
    }

    let response = service.recommend(&split_codes(&args.codes))?;
    print_response(&service, &response, args.explain);
    Ok(())
}

/// Split every argument on whitespace, so `"B C"` and `B C` are the same
/// query.
fn split_codes(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Counts from a line-oriented session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineSummary {
    pub answered: usize,
    pub invalid: usize,
}

/// Answer one query per line of `input`. Blank lines are ignored.
///
/// # Errors
///
/// Only reading `input` can fail; malformed queries are reported inline.
pub fn answer_lines(
    service: &RecommendationService,
    input: impl BufRead,
    explain: bool,
) -> Result<LineSummary> {
    let mut summary = LineSummary::default();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        summary.answered += 1;
        match answer_line(service, &line) {
            Ok(response) => print_response(service, &response, explain),
            Err(e) => {
                summary.invalid += 1;
                warn!(line = %line.trim(), error = %e, "Rejected query");
                print_rejection(&line, &e);
            }
        }
    }
    debug!(answered = summary.answered, invalid = summary.invalid, "Input exhausted");
    Ok(summary)
}

/// Answer a single whitespace-separated line.
///
/// # Errors
///
/// Returns the validation error for a malformed line.
pub fn answer_line(
    service: &RecommendationService,
    line: &str,
) -> std::result::Result<RecommendationResponse, QueryError> {
    let query = Query::parse_line(line)?;
    Ok(service.respond(&query))
}

fn print_rejection(line: &str, err: &QueryError) {
    if output::is_json() {
        output::json_output(json!({
            "status": "invalid_query",
            "input": line.trim(),
            "error": err.to_string(),
        }));
        return;
    }
    output::error(&format!("{}: {err}", line.trim()));
}

fn print_response(service: &RecommendationService, response: &RecommendationResponse, explain: bool) {
    if output::is_json() {
        let mut value = json!(response);
        if explain {
            if let Some(query) = explained_query(response) {
                value["rules"] = json!(service.matching_rules(&query));
            }
        }
        output::json_output(value);
        return;
    }

    match response {
        RecommendationResponse::Recommended { codes, .. } => {
            output::result(&output::codes(codes));
        }
        RecommendationResponse::NoRecommendation {
            query,
            reason,
            examples,
            ..
        } => {
            output::warning(&format!("No recommendation for {}: {reason}", output::codes(query)));
            if !examples.is_empty() {
                let shown: Vec<String> = examples.iter().map(|e| output::codes(e)).collect();
                output::hint(&format!("covered inputs include: {}", shown.join(" | ")));
            }
        }
    }

    if explain {
        if let Some(query) = explained_query(response) {
            let matched = service.matching_rules(&query);
            if !matched.is_empty() {
                output::lines(&rule_table(&matched));
            }
        }
    }
}

fn explained_query(response: &RecommendationResponse) -> Option<Query> {
    let query = match response {
        RecommendationResponse::Recommended { query, .. }
        | RecommendationResponse::NoRecommendation { query, .. } => query,
    };
    Query::parse(query).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::mining::{apriori::mine, rules::generate_rules};
    use crate::domain::RuleSet;
    use crate::testkit::domain::scenario_a;

    fn service() -> RecommendationService {
        let frequent = mine(&scenario_a(), 0.5).unwrap();
        RecommendationService::new(RuleSet::new(generate_rules(&frequent, 0.6).unwrap()))
    }

    #[test]
    fn answers_each_line_and_counts_rejections() {
        let input = "A\n\nZ\nA A\n  B  \n";
        let summary = answer_lines(&service(), input.as_bytes(), false).unwrap();
        assert_eq!(
            summary,
            LineSummary {
                answered: 4,
                invalid: 1
            }
        );
    }

    #[test]
    fn single_line_uses_whitespace_separation() {
        let response = answer_line(&service(), "  A\t").unwrap();
        assert_eq!(response.codes(), ["B".to_string()].as_slice());
        assert!(matches!(
            answer_line(&service(), "   "),
            Err(QueryError::Empty)
        ));
    }

    #[test]
    fn quoted_arguments_split_into_codes() {
        let args = vec!["B C".to_string(), " D\t".to_string()];
        assert_eq!(split_codes(&args), vec!["B", "C", "D"]);

        let response = service().recommend(&split_codes(&["B C".to_string()])).unwrap();
        assert_eq!(response.codes(), ["A".to_string()].as_slice());
    }

    #[test]
    fn explained_query_round_trips_response_query() {
        let response = answer_line(&service(), "B C").unwrap();
        let query = explained_query(&response).unwrap();
        assert_eq!(query.to_strings(), vec!["B".to_string(), "C".to_string()]);
    }
}
