//! Rule generation from frequent itemsets.

use tracing::info;

use crate::domain::{Code, Itemset, Rule};
use crate::error::MiningError;

use super::apriori::FrequentItemsets;

/// Largest itemset that can be split with a `u64` partition mask.
const MAX_PARTITION_LEN: usize = 63;

/// Derive every rule meeting `min_confidence` from a frequent itemset table.
///
/// Each itemset with at least two codes is split every possible way into a
/// non-empty antecedent and a non-empty consequent. Output order is
/// deterministic: itemsets by size then canonical order, and within an
/// itemset by ascending partition mask over its sorted codes.
///
/// # Errors
///
/// Returns [`MiningError::InvalidThreshold`] if `min_confidence` is outside
/// `[0, 1]`, and [`MiningError::MissingSubsetSupport`] if the table is not
/// closed under subsets (never the case for tables built by the miner).
pub fn generate_rules(
    frequent: &FrequentItemsets,
    min_confidence: f64,
) -> Result<Vec<Rule>, MiningError> {
    if !min_confidence.is_finite() || !(0.0..=1.0).contains(&min_confidence) {
        return Err(MiningError::InvalidThreshold {
            name: "min_confidence",
            value: min_confidence,
            expected: "a value in [0, 1]",
        });
    }

    let mut rules = Vec::new();
    for (itemset, support) in frequent.iter().filter(|(itemset, _)| itemset.len() >= 2) {
        let codes: Vec<&Code> = itemset.iter().collect();
        if codes.len() > MAX_PARTITION_LEN {
            return Err(MiningError::ItemsetTooLarge {
                itemset: itemset.to_string(),
                len: codes.len(),
            });
        }

        let full_mask = (1u64 << codes.len()) - 1;
        for mask in 1..full_mask {
            let (antecedent, consequent) = split(&codes, mask)?;
            let antecedent_support = lookup(frequent, &antecedent)?;

            let confidence = support / antecedent_support;
            if confidence < min_confidence {
                continue;
            }

            let consequent_support = lookup(frequent, &consequent)?;
            rules.push(Rule::from_supports(
                antecedent,
                consequent,
                antecedent_support,
                consequent_support,
                support,
            )?);
        }
    }

    info!(
        itemsets = frequent.len(),
        min_confidence,
        rules = rules.len(),
        "Association rules generated"
    );
    Ok(rules)
}

/// Codes whose bit is set form the antecedent; the rest the consequent.
fn split(codes: &[&Code], mask: u64) -> Result<(Itemset, Itemset), MiningError> {
    let (antecedent, consequent): (Vec<(usize, &Code)>, Vec<(usize, &Code)>) = codes
        .iter()
        .copied()
        .enumerate()
        .partition(|(bit, _)| mask & (1u64 << *bit) != 0);

    let antecedent = Itemset::new(antecedent.into_iter().map(|(_, c)| c.clone()))?;
    let consequent = Itemset::new(consequent.into_iter().map(|(_, c)| c.clone()))?;
    Ok((antecedent, consequent))
}

fn lookup(frequent: &FrequentItemsets, itemset: &Itemset) -> Result<f64, MiningError> {
    frequent
        .support(itemset)
        .ok_or_else(|| MiningError::MissingSubsetSupport {
            itemset: itemset.to_string(),
        })
}
