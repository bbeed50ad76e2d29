//! Association rules and rule sets.
//!
//! A [`Rule`] states that when every code of its antecedent is present, the
//! codes of its consequent tend to be present too. Rules carry the supports
//! they were derived from so every statistic can be re-checked after a
//! reload:
//!
//! - `confidence = support / antecedent_support`
//! - `lift = confidence / consequent_support`
//!
//! A [`RuleSet`] is the full output of one mining run. It is replaced
//! wholesale on rebuild and never mutated in place.
//!
//! # Examples
//!
//! ```
//! use codemine::domain::id::Code;
//! use codemine::domain::itemset::Itemset;
//! use codemine::domain::rule::Rule;
//!
//! let a = Itemset::singleton(Code::parse("A").unwrap());
//! let b = Itemset::singleton(Code::parse("B").unwrap());
//! let rule = Rule::from_supports(a, b, 1.0, 0.75, 0.75).unwrap();
//!
//! assert_eq!(rule.confidence, 0.75);
//! assert_eq!(rule.lift, 1.0);
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::Code;
use super::itemset::Itemset;

/// Tolerance used when re-checking derived statistics of a loaded rule.
const STATISTIC_TOLERANCE: f64 = 1e-9;

/// A directional association rule `antecedent -> consequent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// The "if" side.
    pub antecedent: Itemset,
    /// The "then" side. Disjoint from the antecedent.
    pub consequent: Itemset,
    /// Support of the antecedent alone.
    pub antecedent_support: f64,
    /// Support of the consequent alone.
    pub consequent_support: f64,
    /// Support of `antecedent ∪ consequent`.
    pub support: f64,
    /// `support / antecedent_support`.
    pub confidence: f64,
    /// `confidence / consequent_support`.
    pub lift: f64,
}

impl Rule {
    /// Build a rule from the supports of its parts, deriving confidence and
    /// lift.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the sides overlap, a support is outside
    /// `(0, 1]`, or the resulting confidence exceeds 1.
    pub fn from_supports(
        antecedent: Itemset,
        consequent: Itemset,
        antecedent_support: f64,
        consequent_support: f64,
        support: f64,
    ) -> Result<Self, DomainError> {
        check_disjoint(&antecedent, &consequent)?;
        check_support("antecedent_support", antecedent_support)?;
        check_support("consequent_support", consequent_support)?;
        check_support("support", support)?;

        let confidence = support / antecedent_support;
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::ConfidenceOutOfRange { confidence });
        }
        let lift = confidence / consequent_support;

        Ok(Self {
            antecedent,
            consequent,
            antecedent_support,
            consequent_support,
            support,
            confidence,
            lift,
        })
    }

    /// Re-check every invariant of a rule that did not come from
    /// [`Rule::from_supports`], e.g. one read back from storage.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_disjoint(&self.antecedent, &self.consequent)?;
        check_support("antecedent_support", self.antecedent_support)?;
        check_support("consequent_support", self.consequent_support)?;
        check_support("support", self.support)?;

        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(DomainError::ConfidenceOutOfRange {
                confidence: self.confidence,
            });
        }
        if !approx_eq(self.confidence, self.support / self.antecedent_support) {
            return Err(DomainError::InconsistentStatistic { name: "confidence" });
        }
        if !self.lift.is_finite() || !approx_eq(self.lift, self.confidence / self.consequent_support)
        {
            return Err(DomainError::InconsistentStatistic { name: "lift" });
        }
        Ok(())
    }

    /// Returns true if the rule fires for a query containing `codes`.
    #[must_use]
    pub fn applies_to(&self, codes: &BTreeSet<Code>) -> bool {
        self.antecedent.is_subset_of(codes)
    }

    /// Observed joint support minus the support expected under independence.
    #[must_use]
    pub fn leverage(&self) -> f64 {
        self.support - self.antecedent_support * self.consequent_support
    }

    /// `(1 - consequent_support) / (1 - confidence)`.
    ///
    /// `None` when confidence is 1, where conviction is unbounded.
    #[must_use]
    pub fn conviction(&self) -> Option<f64> {
        if self.confidence >= 1.0 {
            None
        } else {
            Some((1.0 - self.consequent_support) / (1.0 - self.confidence))
        }
    }
}

fn check_disjoint(antecedent: &Itemset, consequent: &Itemset) -> Result<(), DomainError> {
    match antecedent.iter().find(|code| consequent.contains(code)) {
        Some(code) => Err(DomainError::OverlappingRuleSides {
            code: code.as_str().to_string(),
        }),
        None => Ok(()),
    }
}

fn check_support(name: &'static str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(DomainError::SupportOutOfRange { name, value })
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= STATISTIC_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Where a rule set came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Minimum support used for itemset mining.
    pub min_support: f64,
    /// Minimum confidence used for rule acceptance.
    pub min_confidence: f64,
    /// Number of transactions mined.
    pub transactions: usize,
    /// Number of input records skipped as malformed.
    pub skipped_records: usize,
    /// Number of frequent itemsets found.
    pub frequent_itemsets: usize,
    /// When the mining run finished.
    pub built_at: DateTime<Utc>,
}

/// The complete collection of rules produced by one mining run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provenance: Option<Provenance>,
}

impl RuleSet {
    /// Create a rule set without provenance.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            provenance: None,
        }
    }

    /// Attach provenance information.
    #[must_use]
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// The rules, in generation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Provenance, if recorded.
    #[must_use]
    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter()
    }

    /// Validate every rule.
    ///
    /// # Errors
    ///
    /// Returns the index of the first invalid rule with its error.
    pub fn validate(&self) -> Result<(), (usize, DomainError)> {
        for (index, rule) in self.rules.iter().enumerate() {
            rule.validate().map_err(|e| (index, e))?;
        }
        Ok(())
    }

    /// Antecedents known to yield a recommendation, shortest first.
    ///
    /// Every antecedent qualifies: used as a query it fires its own rule,
    /// and that rule's consequent is disjoint from it.
    #[must_use]
    pub fn coverage_examples(&self, limit: usize) -> Vec<Itemset> {
        let mut antecedents: Vec<&Itemset> = self.rules.iter().map(|r| &r.antecedent).collect();
        antecedents.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        antecedents.dedup();
        antecedents.into_iter().take(limit).cloned().collect()
    }
}
