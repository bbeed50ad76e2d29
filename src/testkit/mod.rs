//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for codes, itemsets, transactions and queries.
//! - [`store`] - Canned transaction sources and failing rule stores.
//! - [`config`] - Canonical test configurations rooted in a scratch directory.

pub mod config;
pub mod domain;
pub mod store;
