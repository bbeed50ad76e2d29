//! File-backed adapters.

pub mod rule_store;
pub mod transactions;

pub use rule_store::JsonRuleStore;
pub use transactions::{CsvTransactionSource, TransactionFormat};
