use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::query::QueryError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors that abort a mining run.
///
/// A run either completes and produces a rule set or fails with one of
/// these; there are no partial results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiningError {
    #[error("invalid {name}: {value} (expected {expected})")]
    InvalidThreshold {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("candidate budget exceeded at itemset size {size}: {candidates} > {limit}")]
    CandidateBudgetExceeded {
        size: usize,
        candidates: usize,
        limit: usize,
    },

    #[error("itemset {itemset} has {len} codes, too many to partition into rules")]
    ItemsetTooLarge { itemset: String, len: usize },

    #[error("support of subset {itemset} missing from frequent itemsets")]
    MissingSubsetSupport { itemset: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Rule store errors.
///
/// `NotFound` is recoverable (mine a fresh rule set); `Corrupt` needs an
/// operator and must never be papered over with an empty rule set.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no rule set has been built at {path}")]
    NotFound { path: String },

    #[error("rule set at {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("failed to encode rule set: {0}")]
    Encode(String),

    #[error("rule store I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors reading the transaction log as a whole.
///
/// Individual malformed records are skipped and reported, not raised.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read transactions from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("transaction file {path} has no header row")]
    MissingHeader { path: String },

    #[error("invalid header in {path}: {reason}")]
    InvalidHeader { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Mining(#[from] MiningError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
