//! Codemine - association-rule mining and code recommendation.
//!
//! An offline phase mines frequent itemsets from a transaction log with
//! Apriori and derives association rules; an online phase matches queries
//! against the stored rule set and recommends co-occurring codes.
//!
//! # Architecture
//!
//! - [`domain`] - Codes, itemsets, transactions, rules and queries
//! - [`application`] - Apriori mining, rule generation and matching
//! - [`port`] - Traits at the boundaries: rule store, transaction source,
//!   recommender
//! - [`adapter`] - CSV ingestion, JSON rule store and the command line
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use codemine::application::mining::{generate_rules, mine};
//! use codemine::application::recommend::recommend;
//! use codemine::domain::{Code, Query, RuleSet, Transaction};
//!
//! let log: Vec<Transaction> = [["A", "B"], ["A", "B"], ["A", "C"]]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, codes)| {
//!         let codes = codes.iter().map(|c| Code::parse(c).unwrap());
//!         Transaction::new(format!("t{i}"), codes).unwrap()
//!     })
//!     .collect();
//!
//! let frequent = mine(&log, 0.5).unwrap();
//! let rules = RuleSet::new(generate_rules(&frequent, 0.6).unwrap());
//! let codes = recommend(&Query::parse(["A"]).unwrap(), &rules).unwrap();
//! assert_eq!(codes.len(), 1);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
