//! Persistence port for mined rule sets.

use crate::domain::RuleSet;
use crate::error::StoreError;

/// Durable storage for the rule set produced by a mining run.
///
/// The store is the boundary between offline mining and online serving. A
/// saved rule set replaces the previous one as a whole.
pub trait RuleStore: Send + Sync {
    /// Persist `rules`, atomically replacing any earlier version.
    ///
    /// Readers must never observe a partially written rule set.
    fn save(&self, rules: &RuleSet) -> Result<(), StoreError>;

    /// Load the most recently saved rule set.
    ///
    /// Returns [`StoreError::NotFound`] if nothing was ever saved and
    /// [`StoreError::Corrupt`] if the stored data does not parse or fails
    /// validation.
    fn load(&self) -> Result<RuleSet, StoreError>;

    /// Human-readable location, for logs and CLI output.
    fn location(&self) -> String;
}
