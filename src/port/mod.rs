//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!   transactions ──► TransactionSource ─┐
//!                                       ▼
//!                        mine ─► generate ─► RuleStore ─► Recommender ◄── caller
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::transactions::TransactionSource`] - Historical transaction log
//! - [`outbound::store::RuleStore`] - Rule set persistence
//! - [`inbound::recommend::Recommender`] - Recommendation entry point

pub mod inbound;
pub mod outbound;
