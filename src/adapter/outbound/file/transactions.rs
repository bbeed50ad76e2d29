//! CSV transaction log reader.
//!
//! Two layouts are understood:
//!
//! - `one_hot`: a header `Transaction_ID,<code>,<code>,...` followed by one
//!   row per transaction holding a presence flag per code column.
//! - `basket`: one row per transaction, `id,<code>,<code>,...`, no header.
//!
//! Fields are comma separated; surrounding whitespace and double quotes are
//! stripped. Blank lines and lines starting with `#` are ignored. A row that
//! cannot be turned into a valid transaction is skipped, logged at `warn`
//! and reported back in [`TransactionLog::skipped`].

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Code, SkippedRecord, Transaction, TransactionLog};
use crate::error::IngestError;
use crate::port::outbound::transactions::TransactionSource;

/// Name of the id column in a one-hot header.
pub const ID_COLUMN: &str = "Transaction_ID";

/// Layout of the transaction file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionFormat {
    /// Header of codes, one presence flag per code per row.
    #[default]
    OneHot,
    /// Each row lists the codes present.
    Basket,
}

impl std::fmt::Display for TransactionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OneHot => write!(f, "one_hot"),
            Self::Basket => write!(f, "basket"),
        }
    }
}

/// [`TransactionSource`] reading a CSV file.
#[derive(Debug, Clone)]
pub struct CsvTransactionSource {
    path: PathBuf,
    format: TransactionFormat,
}

impl CsvTransactionSource {
    pub fn new(path: impl Into<PathBuf>, format: TransactionFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> TransactionFormat {
        self.format
    }
}

impl TransactionSource for CsvTransactionSource {
    fn load(&self) -> Result<TransactionLog, IngestError> {
        let location = self.location();
        let content = fs::read_to_string(&self.path).map_err(|source| IngestError::Read {
            path: location.clone(),
            source,
        })?;

        let log = parse_transactions(&content, self.format, &location)?;
        info!(
            path = %location,
            format = %self.format,
            transactions = log.len(),
            skipped = log.skipped.len(),
            "Transactions loaded"
        );
        Ok(log)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse transaction records from `content`.
///
/// `path` is only used in error messages.
///
/// # Errors
///
/// Fails when a one-hot file has no header or an unusable one. Problems with
/// individual rows never fail the parse.
pub fn parse_transactions(
    content: &str,
    format: TransactionFormat,
    path: &str,
) -> Result<TransactionLog, IngestError> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let parser = match format {
        TransactionFormat::OneHot => {
            let (_, header) = lines.next().ok_or_else(|| IngestError::MissingHeader {
                path: path.to_string(),
            })?;
            RowParser::OneHot(parse_header(header, path)?)
        }
        TransactionFormat::Basket => RowParser::Basket,
    };

    let mut log = TransactionLog::default();
    let mut seen_ids = HashSet::new();

    for (line_no, line) in lines {
        let fields = split_fields(line);
        let result = parser.parse_row(&fields).and_then(|(id, codes)| {
            if seen_ids.contains(&id) {
                return Err(format!("duplicate transaction id {id}"));
            }
            let transaction = Transaction::new(id.clone(), codes).map_err(|e| e.to_string())?;
            seen_ids.insert(id);
            Ok(transaction)
        });

        match result {
            Ok(transaction) => log.transactions.push(transaction),
            Err(reason) => {
                warn!(path = %path, line = line_no, reason = %reason, "Skipping malformed record");
                log.skipped.push(SkippedRecord {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    Ok(log)
}

enum RowParser {
    OneHot(Vec<Code>),
    Basket,
}

impl RowParser {
    fn parse_row(&self, fields: &[&str]) -> Result<(String, Vec<Code>), String> {
        let (id, rest) = match fields.split_first() {
            Some((id, rest)) if !id.is_empty() => (id.to_string(), rest),
            _ => return Err("missing transaction id".to_string()),
        };

        match self {
            Self::OneHot(columns) => {
                if rest.len() != columns.len() {
                    return Err(format!(
                        "expected {} flag columns, found {}",
                        columns.len(),
                        rest.len()
                    ));
                }
                let mut codes = Vec::new();
                for (column, raw) in columns.iter().zip(rest) {
                    match parse_flag(raw) {
                        Some(true) => codes.push(column.clone()),
                        Some(false) => {}
                        None => return Err(format!("invalid flag {raw:?} for code {column}")),
                    }
                }
                Ok((id, codes))
            }
            Self::Basket => {
                let codes = rest
                    .iter()
                    .filter(|raw| !raw.is_empty())
                    .map(|raw| Code::parse(raw).map_err(|e| e.to_string()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((id, codes))
            }
        }
    }
}

fn parse_header(header: &str, path: &str) -> Result<Vec<Code>, IngestError> {
    let invalid = |reason: String| IngestError::InvalidHeader {
        path: path.to_string(),
        reason,
    };

    let fields = split_fields(header);
    let (first, rest) = fields
        .split_first()
        .ok_or_else(|| invalid("empty header".to_string()))?;
    if !first.eq_ignore_ascii_case(ID_COLUMN) {
        return Err(invalid(format!(
            "first column must be {ID_COLUMN}, found {first:?}"
        )));
    }
    if rest.is_empty() {
        return Err(invalid("no code columns".to_string()));
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(rest.len());
    for raw in rest {
        let code = Code::parse(raw).map_err(|e| invalid(format!("column {raw:?}: {e}")))?;
        if !seen.insert(code.clone()) {
            return Err(invalid(format!("duplicate code column {code}")));
        }
        columns.push(code);
    }
    Ok(columns)
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"').trim())
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}
