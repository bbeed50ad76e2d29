//! Itemsets: non-empty sets of codes considered together.
//!
//! An [`Itemset`] is backed by a `BTreeSet`, so duplicates collapse and two
//! itemsets compare equal exactly when they hold the same codes, whatever
//! order they were built in. The sorted iteration order doubles as the
//! canonical order used for deterministic output.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::Code;

/// A non-empty set of codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<Code>", into = "Vec<Code>")]
pub struct Itemset(BTreeSet<Code>);

impl Itemset {
    /// Build an itemset from codes, collapsing duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyItemset`] when no codes are given.
    pub fn new(codes: impl IntoIterator<Item = Code>) -> Result<Self, DomainError> {
        let set: BTreeSet<Code> = codes.into_iter().collect();
        if set.is_empty() {
            return Err(DomainError::EmptyItemset);
        }
        Ok(Self(set))
    }

    /// Build a single-code itemset.
    #[must_use]
    pub fn singleton(code: Code) -> Self {
        Self(BTreeSet::from([code]))
    }

    /// Number of codes in the itemset.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate codes in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = &Code> + '_ {
        self.0.iter()
    }

    /// Borrow the underlying set.
    #[must_use]
    pub fn codes(&self) -> &BTreeSet<Code> {
        &self.0
    }

    /// Returns true if the itemset contains `code`.
    #[must_use]
    pub fn contains(&self, code: &Code) -> bool {
        self.0.contains(code)
    }

    /// Returns true if every code of this itemset is in `codes`.
    #[must_use]
    pub fn is_subset_of(&self, codes: &BTreeSet<Code>) -> bool {
        self.0.is_subset(codes)
    }

    /// Returns true if the two itemsets share no code.
    #[must_use]
    pub fn is_disjoint(&self, other: &Itemset) -> bool {
        self.0.is_disjoint(&other.0)
    }

    /// Returns a new itemset with `code` added.
    #[must_use]
    pub fn with(&self, code: Code) -> Self {
        let mut set = self.0.clone();
        set.insert(code);
        Self(set)
    }

    /// Returns a new itemset with `code` removed, or `None` if that would
    /// leave it empty.
    #[must_use]
    pub fn without(&self, code: &Code) -> Option<Self> {
        let mut set = self.0.clone();
        set.remove(code);
        (!set.is_empty()).then_some(Self(set))
    }

    /// Returns the union of two itemsets.
    #[must_use]
    pub fn union(&self, other: &Itemset) -> Self {
        Self(self.0.union(&other.0).cloned().collect())
    }

    /// Codes as owned strings, in canonical order.
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl TryFrom<Vec<Code>> for Itemset {
    type Error = DomainError;

    /// Strict conversion used when reading persisted data: duplicates are
    /// an error rather than silently collapsed.
    fn try_from(codes: Vec<Code>) -> Result<Self, Self::Error> {
        let mut set = BTreeSet::new();
        for code in codes {
            if set.contains(&code) {
                return Err(DomainError::DuplicateCode {
                    code: code.as_str().to_string(),
                });
            }
            set.insert(code);
        }
        if set.is_empty() {
            return Err(DomainError::EmptyItemset);
        }
        Ok(Self(set))
    }
}

impl From<Itemset> for Vec<Code> {
    fn from(itemset: Itemset) -> Self {
        itemset.0.into_iter().collect()
    }
}

impl fmt::Display for Itemset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{code}")?;
        }
        write!(f, "}}")
    }
}
