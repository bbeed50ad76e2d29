//! Port doubles: an in-memory transaction source and a rule store that
//! fails on demand.

use crate::domain::{RuleSet, SkippedRecord, Transaction, TransactionLog};
use crate::error::{IngestError, StoreError};
use crate::port::outbound::store::RuleStore;
use crate::port::outbound::transactions::TransactionSource;

/// Transaction source serving a fixed log.
#[derive(Debug, Clone, Default)]
pub struct StaticTransactionSource {
    transactions: Vec<Transaction>,
    skipped: Vec<SkippedRecord>,
}

impl StaticTransactionSource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            skipped: Vec::new(),
        }
    }

    /// Also report `skipped` records, as a file source would for bad rows.
    pub fn with_skipped(mut self, skipped: Vec<SkippedRecord>) -> Self {
        self.skipped = skipped;
        self
    }
}

impl TransactionSource for StaticTransactionSource {
    fn load(&self) -> Result<TransactionLog, IngestError> {
        Ok(TransactionLog {
            transactions: self.transactions.clone(),
            skipped: self.skipped.clone(),
        })
    }

    fn location(&self) -> String {
        "static".to_string()
    }
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Corrupt,
    Unwritable,
}

/// Rule store whose reads report corruption or whose writes fail.
#[derive(Debug)]
pub struct FailingRuleStore {
    failure: Failure,
}

impl FailingRuleStore {
    /// Every load reports a corrupt rule set.
    pub fn corrupt() -> Self {
        Self {
            failure: Failure::Corrupt,
        }
    }

    /// Every save fails with an I/O error; loads find nothing.
    pub fn unwritable() -> Self {
        Self {
            failure: Failure::Unwritable,
        }
    }
}

impl RuleStore for FailingRuleStore {
    fn save(&self, _rules: &RuleSet) -> Result<(), StoreError> {
        match self.failure {
            Failure::Corrupt => Ok(()),
            Failure::Unwritable => Err(StoreError::Io {
                path: self.location(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            }),
        }
    }

    fn load(&self) -> Result<RuleSet, StoreError> {
        match self.failure {
            Failure::Corrupt => Err(StoreError::Corrupt {
                path: self.location(),
                reason: "truncated".to_string(),
            }),
            Failure::Unwritable => Err(StoreError::NotFound {
                path: self.location(),
            }),
        }
    }

    fn location(&self) -> String {
        "failing".to_string()
    }
}
