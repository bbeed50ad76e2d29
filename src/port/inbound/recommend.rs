//! Recommendation entry point consumed by the serving layer.
//!
//! A caller hands over raw code strings and receives either a set of
//! recommended codes or a "no recommendation" answer carrying a
//! machine-readable reason code. Malformed input is a separate
//! [`QueryError`]; neither of these is a server fault.

use serde::Serialize;

use crate::domain::QueryError;

/// Reason code reported when no rule covers a query.
pub const NO_APPLICABLE_RULE: &str = "no_applicable_rule";

/// Why a valid query produced no recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoRecommendationReason {
    /// No rule's antecedent is contained in the query.
    NoMatchingRule,
    /// Rules matched, but every consequent code is already in the query.
    AlreadyCovered,
}

impl NoRecommendationReason {
    /// Short human-readable explanation.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::NoMatchingRule => "no rule matches these codes",
            Self::AlreadyCovered => "every related code is already in the query",
        }
    }
}

impl std::fmt::Display for NoRecommendationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Outcome of a well-formed recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationResponse {
    /// Codes that tend to co-occur with the query, sorted.
    Recommended {
        query: Vec<String>,
        codes: Vec<String>,
    },
    /// The rule base does not cover this query.
    NoRecommendation {
        query: Vec<String>,
        reason_code: &'static str,
        reason: NoRecommendationReason,
        /// Inputs known to produce a recommendation.
        examples: Vec<Vec<String>>,
    },
}

impl RecommendationResponse {
    /// Recommended codes, empty for a `NoRecommendation` answer.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        match self {
            Self::Recommended { codes, .. } => codes,
            Self::NoRecommendation { .. } => &[],
        }
    }

    /// True for a `Recommended` answer.
    #[must_use]
    pub fn is_recommended(&self) -> bool {
        matches!(self, Self::Recommended { .. })
    }
}

/// Serves recommendations for raw caller input.
pub trait Recommender: Send + Sync {
    /// Validate `codes` and match them against the current rule set.
    fn recommend(&self, codes: &[String]) -> Result<RecommendationResponse, QueryError>;
}
