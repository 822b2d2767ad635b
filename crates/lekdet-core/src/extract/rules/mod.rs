//! Rule-based candidate extractors for Thai news text.

pub mod patterns;
pub mod plate;
pub mod address;
pub mod dates;
pub mod people;
pub mod flight;
pub mod bare;

pub use plate::LicensePlateRule;
pub use address::{AddressNumberRule, KilometerMarkerRule};
pub use dates::CalendarDateRule;
pub use people::{AgeRule, CasualtyRule};
pub use flight::FlightNumberRule;
pub use bare::BareDigitsRule;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::LotteryNumber;

use super::normalize::to_three_digits;

/// The extraction rules, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    LicensePlate,
    AddressNumber,
    KilometerMarker,
    CalendarDate,
    Age,
    Casualty,
    FlightNumber,
    BareDigits,
}

impl RuleKind {
    /// Fixed confidence for candidates produced by this rule.
    pub fn confidence(&self) -> u8 {
        match self {
            Self::LicensePlate => 85,
            Self::AddressNumber => 80,
            Self::KilometerMarker => 75,
            Self::CalendarDate => 75,
            Self::Age => 70,
            Self::Casualty => 80,
            Self::FlightNumber => 85,
            Self::BareDigits => 50,
        }
    }

    /// Prefix used in candidate reasoning.
    pub fn label(&self) -> &'static str {
        match self {
            Self::LicensePlate => "license plate",
            Self::AddressNumber => "address number",
            Self::KilometerMarker => "kilometer marker",
            Self::CalendarDate => "date",
            Self::Age => "age",
            Self::Casualty => "casualties",
            Self::FlightNumber => "flight number",
            Self::BareDigits => "3-digit number in text",
        }
    }
}

/// One number found by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    /// Derived 3-digit number.
    pub number: LotteryNumber,
    /// Text that was matched.
    pub source: String,
    /// Human-readable justification detail.
    pub detail: String,
}

impl RuleHit {
    pub fn new(number: LotteryNumber, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            number,
            detail: source.clone(),
            source,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

/// A single extraction pattern.
///
/// Rules are pure: they report every hit in left-to-right order and leave
/// deduplication and capping to the extractor.
pub trait CandidateRule: Send + Sync {
    /// Which rule this is.
    fn kind(&self) -> RuleKind;

    /// Find all hits in `text`.
    fn find(&self, text: &str) -> Vec<RuleHit>;
}

/// All rules in priority order.
pub fn default_rules() -> Vec<Box<dyn CandidateRule>> {
    vec![
        Box::new(LicensePlateRule),
        Box::new(AddressNumberRule),
        Box::new(KilometerMarkerRule),
        Box::new(CalendarDateRule),
        Box::new(AgeRule),
        Box::new(CasualtyRule),
        Box::new(FlightNumberRule),
        Box::new(BareDigitsRule),
    ]
}

/// Hits for patterns whose `group` is a digit run reduced to its last three digits.
///
/// `accept` sees the whole-match start offset and can veto a hit.
pub(crate) fn trailing_digit_hits(
    pattern: &Regex,
    text: &str,
    group: usize,
    accept: impl Fn(usize) -> bool,
) -> Vec<RuleHit> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            if !accept(full.start()) {
                return None;
            }
            let number = to_three_digits(caps.get(group)?.as_str())?;
            Some(RuleHit::new(number, full.as_str()))
        })
        .collect()
}

/// True if the character before `offset` is a Thai letter or mark.
///
/// Thai digits (๐-๙) do not count.
pub(crate) fn preceded_by_thai(text: &str, offset: usize) -> bool {
    text[..offset].chars().next_back().is_some_and(|c| {
        ('\u{0E00}'..='\u{0E7F}').contains(&c) && !('\u{0E50}'..='\u{0E59}').contains(&c)
    })
}

/// True if the character before `offset` is a digit.
pub(crate) fn preceded_by_digit(text: &str, offset: usize) -> bool {
    text[..offset]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit() || ('\u{0E50}'..='\u{0E59}').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_table() {
        let rules = default_rules();
        let confidences: Vec<u8> = rules.iter().map(|r| r.kind().confidence()).collect();
        assert_eq!(confidences, vec![85, 80, 75, 75, 70, 80, 85, 50]);
    }

    #[test]
    fn test_preceded_by_thai() {
        let text = "เสียชีวิต 5";
        let t = text.find('ต').unwrap();
        assert!(preceded_by_thai(text, t));
        assert!(!preceded_by_thai("a กข", 2));
        assert!(!preceded_by_thai("กข", 0));
        assert!(!preceded_by_thai("๑กฮ", "๑".len()));
    }
}
