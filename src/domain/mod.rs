//! Codes, itemsets, transactions and rules.
//!
//! Everything here is pure data with validating constructors; the mining
//! and matching algorithms live in [`crate::application`].

pub mod error;
pub mod id;
pub mod itemset;
pub mod query;
pub mod rule;
pub mod transaction;

pub use error::DomainError;
pub use id::{Code, TransactionId};
pub use itemset::Itemset;
pub use query::{Query, QueryError};
pub use rule::{Provenance, Rule, RuleSet};
pub use transaction::{SkippedRecord, Transaction, TransactionLog};
