//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by the validating constructors of [`Code`],
//! [`Itemset`], [`Transaction`] and [`Rule`], and by [`RuleSet::validate`]
//! when a persisted rule set is reloaded.
//!
//! # Examples
//!
//! ```
//! use codemine::domain::error::DomainError;
//! use codemine::domain::itemset::Itemset;
//!
//! let result = Itemset::new(Vec::new());
//! assert!(matches!(result, Err(DomainError::EmptyItemset)));
//! ```
//!
//! [`Code`]: super::id::Code
//! [`Itemset`]: super::itemset::Itemset
//! [`Transaction`]: super::transaction::Transaction
//! [`Rule`]: super::rule::Rule
//! [`RuleSet::validate`]: super::rule::RuleSet::validate

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A code was empty after trimming surrounding whitespace.
    #[error("code cannot be blank")]
    BlankCode,

    /// A code contained whitespace between its characters.
    #[error("code '{code}' contains whitespace")]
    CodeContainsWhitespace {
        /// The offending code, trimmed.
        code: String,
    },

    /// Itemsets must contain at least one code.
    #[error("itemset cannot be empty")]
    EmptyItemset,

    /// The same code appeared twice where a set was expected.
    #[error("duplicate code '{code}'")]
    DuplicateCode {
        /// The repeated code.
        code: String,
    },

    /// Transactions must contain at least one code.
    #[error("transaction '{id}' has no codes")]
    EmptyTransaction {
        /// Identifier of the empty transaction.
        id: String,
    },

    /// Antecedent and consequent of a rule must be disjoint.
    #[error("code '{code}' appears on both sides of the rule")]
    OverlappingRuleSides {
        /// A code present in both antecedent and consequent.
        code: String,
    },

    /// A support value fell outside `(0, 1]` or was not finite.
    #[error("{name} must be in (0, 1], got {value}")]
    SupportOutOfRange {
        /// Which statistic was invalid.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },

    /// Confidence must be within `[0, 1]`.
    #[error("confidence must be in [0, 1], got {confidence}")]
    ConfidenceOutOfRange {
        /// The invalid confidence.
        confidence: f64,
    },

    /// A derived statistic did not match the supports it was computed from.
    #[error("{name} is inconsistent with the recorded supports")]
    InconsistentStatistic {
        /// Which statistic was inconsistent.
        name: &'static str,
    },
}
