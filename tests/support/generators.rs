//! Proptest strategies for transaction logs over a small code alphabet.

use std::collections::BTreeSet;

use codemine::domain::{Code, Transaction};
use proptest::prelude::*;

pub const ALPHABET: &[&str] = &["A", "B", "C", "D", "E", "F"];

fn basket() -> impl Strategy<Value = BTreeSet<usize>> {
    proptest::collection::btree_set(0..ALPHABET.len(), 1..=4)
}

/// Non-empty logs of up to 12 transactions, each holding 1 to 4 codes.
pub fn transaction_log() -> impl Strategy<Value = Vec<Transaction>> {
    proptest::collection::vec(basket(), 1..=12).prop_map(|baskets| {
        baskets
            .into_iter()
            .enumerate()
            .map(|(i, basket)| {
                let codes = basket
                    .into_iter()
                    .map(|idx| Code::parse(ALPHABET[idx]).expect("alphabet code"));
                Transaction::new(format!("t{i}"), codes).expect("non-empty basket")
            })
            .collect()
    })
}

/// Queries of 1 to 3 distinct alphabet codes.
pub fn query_codes() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(0..ALPHABET.len(), 1..=3)
        .prop_map(|set| set.into_iter().map(|i| ALPHABET[i].to_string()).collect())
}
