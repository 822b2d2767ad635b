//! Candidate numbers extracted from news text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A canonical 3-digit lottery number ("000" - "999").
///
/// Always exactly three ASCII digits; use
/// [`to_three_digits`](crate::extract::normalize::to_three_digits) to derive
/// one from a raw digit run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LotteryNumber(String);

impl LotteryNumber {
    /// Parse a string that is already exactly three ASCII digits.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// Build from an integer in 0..=999.
    pub fn from_value(value: u32) -> Option<Self> {
        (value <= 999).then(|| Self(format!("{:03}", value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value (0 - 999).
    pub fn value(&self) -> u32 {
        self.0.parse().unwrap_or(0)
    }

    /// True for "000", "111", ... "999".
    pub fn is_repdigit(&self) -> bool {
        let bytes = self.0.as_bytes();
        bytes.iter().all(|b| *b == bytes[0])
    }

    /// True when both numbers use the same digits in any order.
    pub fn is_permutation_of(&self, other: &LotteryNumber) -> bool {
        let mut a: Vec<u8> = self.0.bytes().collect();
        let mut b: Vec<u8> = other.0.bytes().collect();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl fmt::Display for LotteryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LotteryNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("not a 3-digit number: {:?}", s))
    }
}

impl TryFrom<String> for LotteryNumber {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LotteryNumber> for String {
    fn from(value: LotteryNumber) -> Self {
        value.0
    }
}

/// How a candidate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Deterministic pattern matching.
    Direct,
    /// Supplemental (AI) analysis.
    AiAnalyzed,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::AiAnalyzed => "ai_analyzed",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored 3-digit number found in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub number: LotteryNumber,
    pub method: ExtractionMethod,
    /// Which surface text and rule produced the number.
    pub reasoning: String,
    /// Static score, 0 - 100.
    pub confidence: u8,
}

impl Candidate {
    /// Create a candidate; `confidence` is clamped to 0..=100.
    pub fn new(
        number: LotteryNumber,
        method: ExtractionMethod,
        reasoning: impl Into<String>,
        confidence: i64,
    ) -> Self {
        Self {
            number,
            method,
            reasoning: reasoning.into(),
            confidence: confidence.clamp(0, 100) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_three_ascii_digits() {
        assert!(LotteryNumber::parse("438").is_some());
        assert!(LotteryNumber::parse("007").is_some());
        assert!(LotteryNumber::parse("43").is_none());
        assert!(LotteryNumber::parse("4380").is_none());
        assert!(LotteryNumber::parse("4a8").is_none());
        assert!(LotteryNumber::parse("๔๓๘").is_none());
    }

    #[test]
    fn test_repdigit_and_permutation() {
        let n = LotteryNumber::parse("555").unwrap();
        assert!(n.is_repdigit());
        assert!(!LotteryNumber::parse("556").unwrap().is_repdigit());

        let a = LotteryNumber::parse("438").unwrap();
        assert!(a.is_permutation_of(&LotteryNumber::parse("843").unwrap()));
        assert!(!a.is_permutation_of(&LotteryNumber::parse("448").unwrap()));
    }

    #[test]
    fn test_confidence_is_clamped() {
        let n = LotteryNumber::from_value(5).unwrap();
        assert_eq!(n.as_str(), "005");
        assert_eq!(Candidate::new(n.clone(), ExtractionMethod::Direct, "x", 140).confidence, 100);
        assert_eq!(Candidate::new(n, ExtractionMethod::Direct, "x", -3).confidence, 0);
    }

    #[test]
    fn test_serde_rejects_bad_numbers() {
        let ok: LotteryNumber = serde_json::from_str("\"042\"").unwrap();
        assert_eq!(ok.value(), 42);
        assert!(serde_json::from_str::<LotteryNumber>("\"42\"").is_err());
    }
}
