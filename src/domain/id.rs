//! Domain identifier types with proper encapsulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Classification code - newtype for type safety.
///
/// Codes are opaque to the miner and the matcher. Construction trims
/// surrounding whitespace so that `" 71100"` and `"71100"` are the same
/// code; blank codes and codes with interior whitespace are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// Parse and normalise a code.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::BlankCode`] for empty input and
    /// [`DomainError::CodeContainsWhitespace`] when whitespace remains after
    /// trimming.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::BlankCode);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(DomainError::CodeContainsWhitespace {
                code: trimmed.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Code {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Code {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl TryFrom<&str> for Code {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

/// Transaction identifier - newtype for type safety.
///
/// Only used to detect duplicate records during ingestion; the miner never
/// looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    /// Create a new `TransactionId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the transaction ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TransactionId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TransactionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_parse_and_as_str() {
        let code = Code::parse("71100").unwrap();
        assert_eq!(code.as_str(), "71100");
    }

    #[test]
    fn code_parse_trims_surrounding_whitespace() {
        let padded = Code::parse("  86950\t").unwrap();
        let plain = Code::parse("86950").unwrap();
        assert_eq!(padded, plain);
    }

    #[test]
    fn code_parse_rejects_blank() {
        assert_eq!(Code::parse("   "), Err(DomainError::BlankCode));
        assert_eq!(Code::parse(""), Err(DomainError::BlankCode));
    }

    #[test]
    fn code_parse_rejects_interior_whitespace() {
        assert!(matches!(
            Code::parse("86950 86930"),
            Err(DomainError::CodeContainsWhitespace { .. })
        ));
    }

    #[test]
    fn code_from_str() {
        let code: Code = "A0021".parse().unwrap();
        assert_eq!(format!("{}", code), "A0021");
    }

    #[test]
    fn code_deserialize_normalises_and_validates() {
        let code: Code = serde_json::from_str("\" B \"").unwrap();
        assert_eq!(code.as_str(), "B");

        let blank: Result<Code, _> = serde_json::from_str("\"\"");
        assert!(blank.is_err());
    }

    #[test]
    fn code_serializes_as_plain_string() {
        let code = Code::parse("J1100").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"J1100\"");
    }

    #[test]
    fn transaction_id_new_and_display() {
        let id = TransactionId::new("T-1");
        assert_eq!(id.as_str(), "T-1");
        assert_eq!(format!("{}", id), "T-1");
    }

    #[test]
    fn transaction_id_from_str() {
        let id = TransactionId::from("42");
        assert_eq!(id.as_str(), "42");
    }
}
