//! Miette-based error diagnostics for CLI error presentation.
//!
//! Every crate error is mapped onto a diagnostic carrying a stable code and,
//! where there is an obvious next step, a help line.

use miette::Diagnostic;
use thiserror::Error;

use super::output;
use crate::error::{ConfigError, Error, IngestError, MiningError, StoreError};

/// Configuration problem.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(codemine::config))]
pub struct ConfigDiagnostic {
    pub message: String,
    #[help]
    pub help: Option<String>,
}

/// Rule store problem.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(codemine::store))]
pub struct StoreDiagnostic {
    pub message: String,
    #[help]
    pub help: Option<String>,
}

/// Transaction log problem.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(codemine::transactions))]
pub struct IngestDiagnostic {
    pub message: String,
    #[help]
    pub help: Option<String>,
}

/// Mining run failure.
#[derive(Debug, Error, Diagnostic)]
#[error("mining failed: {message}")]
#[diagnostic(code(codemine::mining))]
pub struct MiningDiagnostic {
    pub message: String,
    #[help]
    pub help: Option<String>,
}

/// Rejected query input.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid query: {message}")]
#[diagnostic(
    code(codemine::invalid_query),
    help("pass one or more codes separated by spaces, e.g. `codemine recommend 71100`")
)]
pub struct QueryDiagnostic {
    pub message: String,
}

/// Anything without a more specific category.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(codemine::error))]
pub struct GenericDiagnostic {
    pub message: String,
}

fn some(help: &str) -> Option<String> {
    Some(help.to_string())
}

/// Map a crate error onto a renderable diagnostic.
#[must_use]
pub fn diagnose(err: &Error) -> miette::Report {
    let message = err.to_string();
    match err {
        Error::Config(config) => {
            let help = match config {
                ConfigError::ReadFile(_) => {
                    some("create one with `codemine config init`, or omit --config to use defaults")
                }
                ConfigError::Parse(_) => some("check the TOML syntax at the reported line"),
                ConfigError::MissingField { .. } | ConfigError::InvalidValue { .. } => {
                    some("`codemine config init` writes a template documenting every setting")
                }
            };
            ConfigDiagnostic { message, help }.into()
        }
        Error::Store(store) => {
            let help = match store {
                StoreError::NotFound { .. } => some("run `codemine mine` to build a rule set"),
                StoreError::Corrupt { .. } => some(
                    "run `codemine mine` or `codemine recommend --rebuild` to replace the rule set",
                ),
                StoreError::Encode(_) | StoreError::Io { .. } => None,
            };
            StoreDiagnostic { message, help }.into()
        }
        Error::Ingest(ingest) => {
            let help = match ingest {
                IngestError::Read { .. } => {
                    some("set `[transactions] path` in the config or pass --transactions")
                }
                IngestError::MissingHeader { .. } | IngestError::InvalidHeader { .. } => some(
                    "one_hot files start with `Transaction_ID,<code>,...`; use --format basket for code lists",
                ),
            };
            IngestDiagnostic { message, help }.into()
        }
        Error::Mining(mining) => {
            let help = match mining {
                MiningError::CandidateBudgetExceeded { .. } => {
                    some("raise min_support, or cap itemset size with max_itemset_len")
                }
                MiningError::InvalidThreshold { .. } => {
                    some("min_support must be in (0, 1] and min_confidence in [0, 1]")
                }
                _ => None,
            };
            MiningDiagnostic {
                message: mining.to_string(),
                help,
            }
            .into()
        }
        Error::Query(query) => QueryDiagnostic {
            message: query.to_string(),
        }
        .into(),
        Error::Domain(_) | Error::Json(_) | Error::Io(_) => GenericDiagnostic { message }.into(),
    }
}

/// Print `err` to stderr: a JSON line in `--json` mode, a diagnostic
/// otherwise.
pub fn report(err: &Error) {
    if output::is_json() {
        output::error(&err.to_string());
        return;
    }
    eprintln!("{:?}", diagnose(err));
}
