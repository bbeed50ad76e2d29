//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Code`], [`Itemset`],
//! [`Transaction`] and [`Query`] so tests focus on assertions rather than
//! construction boilerplate. All of them panic on invalid input.

use crate::domain::{Code, Itemset, Query, Transaction};

/// Create a [`Code`] from a string.
pub fn code(raw: &str) -> Code {
    Code::parse(raw).expect("valid test code")
}

/// Create an [`Itemset`] from string codes.
pub fn itemset(codes: &[&str]) -> Itemset {
    Itemset::new(codes.iter().map(|c| code(c))).expect("non-empty test itemset")
}

/// Create a [`Query`] from string codes.
pub fn query(codes: &[&str]) -> Query {
    Query::parse(codes.iter().copied()).expect("valid test query")
}

/// Create transactions `t0`, `t1`, ... from baskets of string codes.
pub fn transactions(baskets: &[&[&str]]) -> Vec<Transaction> {
    baskets
        .iter()
        .enumerate()
        .map(|(i, basket)| {
            Transaction::new(format!("t{i}"), basket.iter().map(|c| code(c)))
                .expect("valid test transaction")
        })
        .collect()
}

/// The four-transaction log used throughout the documentation:
/// `{A,B}, {A,B}, {A,C}, {A,B,C}`.
pub fn scenario_a() -> Vec<Transaction> {
    transactions(&[&["A", "B"], &["A", "B"], &["A", "C"], &["A", "B", "C"]])
}
