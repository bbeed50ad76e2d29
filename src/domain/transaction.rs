//! Transactions: sets of codes observed together.

use std::collections::BTreeSet;

use serde::Serialize;

use super::error::DomainError;
use super::id::{Code, TransactionId};
use super::itemset::Itemset;

/// A set of codes that co-occurred in one historical record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    codes: BTreeSet<Code>,
}

impl Transaction {
    /// Create a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateCode`] if a code repeats and
    /// [`DomainError::EmptyTransaction`] if no codes are given.
    pub fn new(
        id: impl Into<TransactionId>,
        codes: impl IntoIterator<Item = Code>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        let mut set = BTreeSet::new();
        for code in codes {
            if set.contains(&code) {
                return Err(DomainError::DuplicateCode {
                    code: code.as_str().to_string(),
                });
            }
            set.insert(code);
        }
        if set.is_empty() {
            return Err(DomainError::EmptyTransaction {
                id: id.as_str().to_string(),
            });
        }
        Ok(Self { id, codes: set })
    }

    /// Transaction identifier.
    #[must_use]
    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    /// Codes in this transaction.
    #[must_use]
    pub fn codes(&self) -> &BTreeSet<Code> {
        &self.codes
    }

    /// Returns true if every code of `itemset` occurs in this transaction.
    #[must_use]
    pub fn contains_all(&self, itemset: &Itemset) -> bool {
        itemset.is_subset_of(&self.codes)
    }
}

/// A record the ingestion step refused, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// 1-based line number in the source.
    pub line: usize,
    /// Why the record was rejected.
    pub reason: String,
}

/// Output of a transaction source: accepted transactions plus every record
/// that was skipped along the way.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRecord>,
}

impl TransactionLog {
    /// Create a log with no skipped records.
    #[must_use]
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            skipped: Vec::new(),
        }
    }

    /// Number of accepted transactions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// True when no transaction was accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
