//! Online phase: matching queries against a loaded rule set.

pub mod engine;
pub mod service;
pub mod shared;

pub use engine::{applicable_rules, recommend, NoApplicableRule};
pub use service::RecommendationService;
pub use shared::SharedRuleSet;
