//! In-memory rule store for testing and embedding.

use parking_lot::RwLock;

use crate::domain::RuleSet;
use crate::error::StoreError;
use crate::port::outbound::store::RuleStore;

/// Rule store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    rules: RwLock<Option<RuleSet>>,
}

impl MemoryRuleStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleStore for MemoryRuleStore {
    fn save(&self, rules: &RuleSet) -> Result<(), StoreError> {
        *self.rules.write() = Some(rules.clone());
        Ok(())
    }

    fn load(&self) -> Result<RuleSet, StoreError> {
        self.rules
            .read()
            .clone()
            .ok_or_else(|| StoreError::NotFound {
                path: self.location(),
            })
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
