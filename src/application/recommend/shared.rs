//! Atomically swappable rule set for concurrent readers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::RuleSet;

/// The rule set currently being served.
///
/// Readers take an `Arc` snapshot and match against it without holding the
/// lock. [`SharedRuleSet::replace`] swaps the whole reference, so a reader
/// sees either the old rules or the new ones, never a mix.
#[derive(Debug, Default)]
pub struct SharedRuleSet {
    current: RwLock<Arc<RuleSet>>,
}

impl SharedRuleSet {
    /// Wrap an initial rule set.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// Snapshot of the current rule set.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(&self.current.read())
    }

    /// Install a new rule set, returning the one it replaced.
    pub fn replace(&self, rules: RuleSet) -> Arc<RuleSet> {
        let next = Arc::new(rules);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Number of rules currently served.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// True when no rules are served.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}
