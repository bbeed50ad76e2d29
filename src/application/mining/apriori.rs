//! Level-wise frequent itemset mining.
//!
//! Classic apriori: count single codes, keep those meeting `min_support`,
//! then repeatedly join frequent size-k itemsets that share their first
//! k-1 codes into size-k+1 candidates. A candidate survives pruning only if
//! every one of its size-k subsets is frequent, since any subset of a
//! frequent itemset must itself be frequent. Candidates are then counted
//! against the transactions and the frequent ones seed the next level.
//! Enumeration stops when a level yields nothing.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::domain::{Code, Itemset, Transaction};
use crate::error::MiningError;

/// Default cap on candidates generated for a single level.
pub const DEFAULT_MAX_CANDIDATES: usize = 1_000_000;

/// Budget guard for a mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiningLimits {
    /// Stop after itemsets of this size. `None` enumerates until exhaustion.
    pub max_itemset_len: Option<usize>,
    /// Fail the run if a level generates more candidates than this.
    pub max_candidates: usize,
}

impl Default for MiningLimits {
    fn default() -> Self {
        Self {
            max_itemset_len: None,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// All frequent itemsets of a transaction log, each tagged with its support.
///
/// Stored per level (index 0 holds singletons) in canonical order, which
/// makes iteration deterministic and support lookups cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequentItemsets {
    transaction_count: usize,
    levels: Vec<BTreeMap<Itemset, f64>>,
}

impl FrequentItemsets {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from precomputed `(itemset, support)` pairs.
    #[must_use]
    pub fn from_entries(
        transaction_count: usize,
        entries: impl IntoIterator<Item = (Itemset, f64)>,
    ) -> Self {
        let mut levels: Vec<BTreeMap<Itemset, f64>> = Vec::new();
        for (itemset, support) in entries {
            let index = itemset.len() - 1;
            if levels.len() <= index {
                levels.resize_with(index + 1, BTreeMap::new);
            }
            levels[index].insert(itemset, support);
        }
        Self {
            transaction_count,
            levels,
        }
    }

    /// Number of transactions the supports were computed over.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    /// Support of `itemset`, if it is frequent.
    #[must_use]
    pub fn support(&self, itemset: &Itemset) -> Option<f64> {
        let index = itemset.len().checked_sub(1)?;
        self.levels.get(index)?.get(itemset).copied()
    }

    /// Returns true if `itemset` is frequent.
    #[must_use]
    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.support(itemset).is_some()
    }

    /// Total number of frequent itemsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.iter().map(BTreeMap::len).sum()
    }

    /// True when nothing is frequent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the largest frequent itemset, 0 when empty.
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.levels
            .iter()
            .rposition(|level| !level.is_empty())
            .map_or(0, |index| index + 1)
    }

    /// Frequent itemsets of exactly `size` codes.
    pub fn of_size(&self, size: usize) -> impl Iterator<Item = (&Itemset, f64)> + '_ {
        size.checked_sub(1)
            .and_then(|index| self.levels.get(index))
            .into_iter()
            .flat_map(|level| level.iter().map(|(itemset, support)| (itemset, *support)))
    }

    /// All frequent itemsets ordered by size, then canonically.
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> + '_ {
        self.levels
            .iter()
            .flat_map(|level| level.iter().map(|(itemset, support)| (itemset, *support)))
    }
}

/// Mine frequent itemsets with the default budget.
///
/// # Errors
///
/// See [`mine_with_limits`].
pub fn mine(transactions: &[Transaction], min_support: f64) -> Result<FrequentItemsets, MiningError> {
    mine_with_limits(transactions, min_support, &MiningLimits::default())
}

/// Mine every itemset whose support is at least `min_support`.
///
/// An empty transaction slice yields an empty table.
///
/// # Errors
///
/// Returns [`MiningError::InvalidThreshold`] if `min_support` is outside
/// `(0, 1]` and [`MiningError::CandidateBudgetExceeded`] if a level grows
/// past `limits.max_candidates`.
pub fn mine_with_limits(
    transactions: &[Transaction],
    min_support: f64,
    limits: &MiningLimits,
) -> Result<FrequentItemsets, MiningError> {
    validate_min_support(min_support)?;
    if limits.max_itemset_len == Some(0) {
        return Err(MiningError::InvalidThreshold {
            name: "max_itemset_len",
            value: 0.0,
            expected: "at least 1",
        });
    }

    if transactions.is_empty() {
        debug!("No transactions to mine");
        return Ok(FrequentItemsets::empty());
    }

    let total = transactions.len() as f64;
    let mut levels = vec![frequent_singletons(transactions, total, min_support)];
    let mut size = 1;

    loop {
        let previous = &levels[size - 1];
        debug!(size, frequent = previous.len(), "Mined itemset level");

        if previous.is_empty() || limits.max_itemset_len.is_some_and(|max| size >= max) {
            break;
        }

        let candidates = join_and_prune(previous, limits.max_candidates).map_err(|candidates| {
            MiningError::CandidateBudgetExceeded {
                size: size + 1,
                candidates,
                limit: limits.max_candidates,
            }
        })?;
        if candidates.is_empty() {
            break;
        }

        let next = count_candidates(candidates, transactions, total, min_support);
        if next.is_empty() {
            break;
        }
        levels.push(next);
        size += 1;
    }

    while levels.last().is_some_and(BTreeMap::is_empty) {
        levels.pop();
    }

    let frequent = FrequentItemsets {
        transaction_count: transactions.len(),
        levels,
    };
    info!(
        transactions = transactions.len(),
        min_support,
        itemsets = frequent.len(),
        max_len = frequent.max_len(),
        "Frequent itemsets mined"
    );
    Ok(frequent)
}

fn validate_min_support(min_support: f64) -> Result<(), MiningError> {
    if min_support.is_finite() && min_support > 0.0 && min_support <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidThreshold {
            name: "min_support",
            value: min_support,
            expected: "a value in (0, 1]",
        })
    }
}

fn frequent_singletons(
    transactions: &[Transaction],
    total: f64,
    min_support: f64,
) -> BTreeMap<Itemset, f64> {
    let mut counts: BTreeMap<&Code, usize> = BTreeMap::new();
    for transaction in transactions {
        for code in transaction.codes() {
            *counts.entry(code).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .filter_map(|(code, count)| {
            let support = count as f64 / total;
            (support >= min_support).then(|| (Itemset::singleton(code.clone()), support))
        })
        .collect()
}

/// Join size-k itemsets sharing their first k-1 codes, then drop any
/// candidate with an infrequent size-k subset.
///
/// Itemsets in a `BTreeMap` are ordered lexicographically by their sorted
/// codes, so itemsets sharing a prefix are contiguous.
///
/// Generation stops at the first candidate past `max_candidates`; the error
/// carries the number generated so far.
fn join_and_prune(
    previous: &BTreeMap<Itemset, f64>,
    max_candidates: usize,
) -> Result<Vec<Itemset>, usize> {
    let sorted: Vec<(&Itemset, Vec<&Code>)> = previous
        .keys()
        .map(|itemset| (itemset, itemset.iter().collect()))
        .collect();

    let mut candidates = Vec::new();
    for (i, (left, left_codes)) in sorted.iter().enumerate() {
        let prefix_len = left_codes.len() - 1;
        for (_, right_codes) in &sorted[i + 1..] {
            if left_codes[..prefix_len] != right_codes[..prefix_len] {
                break;
            }
            let candidate = left.with(right_codes[prefix_len].clone());
            if all_subsets_frequent(&candidate, previous) {
                candidates.push(candidate);
                if candidates.len() > max_candidates {
                    return Err(candidates.len());
                }
            }
        }
    }
    Ok(candidates)
}

fn all_subsets_frequent(candidate: &Itemset, previous: &BTreeMap<Itemset, f64>) -> bool {
    candidate.iter().all(|code| {
        candidate
            .without(code)
            .is_some_and(|subset| previous.contains_key(&subset))
    })
}

fn count_candidates(
    candidates: Vec<Itemset>,
    transactions: &[Transaction],
    total: f64,
    min_support: f64,
) -> BTreeMap<Itemset, f64> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let count = transactions
                .iter()
                .filter(|t| t.contains_all(&candidate))
                .count();
            let support = count as f64 / total;
            (support >= min_support).then_some((candidate, support))
        })
        .collect()
}
