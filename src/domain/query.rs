//! Validated recommendation queries.

use std::collections::BTreeSet;

use thiserror::Error;

use super::error::DomainError;
use super::id::Code;

/// Reasons a raw query is rejected before any rule matching happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("query must contain at least one code")]
    Empty,

    #[error("invalid code '{raw}': {source}")]
    InvalidCode {
        raw: String,
        #[source]
        source: DomainError,
    },

    #[error("code '{code}' appears more than once in the query")]
    DuplicateCode { code: String },
}

impl QueryError {
    /// Machine-readable reason code for callers.
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        "invalid_query"
    }
}

/// A non-empty set of distinct, normalised codes supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(BTreeSet<Code>);

impl Query {
    /// Validate raw caller input.
    ///
    /// Each entry is normalised with [`Code::parse`]. Two entries that
    /// normalise to the same code are a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] for empty input, invalid codes, or duplicates.
    pub fn parse<I, S>(raw: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codes = BTreeSet::new();
        for entry in raw {
            let entry = entry.as_ref();
            let code = Code::parse(entry).map_err(|source| QueryError::InvalidCode {
                raw: entry.to_string(),
                source,
            })?;
            if codes.contains(&code) {
                return Err(QueryError::DuplicateCode {
                    code: code.as_str().to_string(),
                });
            }
            codes.insert(code);
        }
        if codes.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(codes))
    }

    /// Split a whitespace-separated line into a query.
    ///
    /// # Errors
    ///
    /// Same as [`Query::parse`].
    pub fn parse_line(line: &str) -> Result<Self, QueryError> {
        Self::parse(line.split_whitespace())
    }

    /// Codes in the query.
    #[must_use]
    pub fn codes(&self) -> &BTreeSet<Code> {
        &self.0
    }

    /// Returns true if the query contains `code`.
    #[must_use]
    pub fn contains(&self, code: &Code) -> bool {
        self.0.contains(code)
    }

    /// Number of codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Codes as owned strings, in canonical order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|c| c.as_str().to_string()).collect()
    }
}
