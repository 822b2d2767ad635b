//! Stand-alone 3-digit runs.

use super::patterns::DIGIT_RUN;
use super::{CandidateRule, RuleHit, RuleKind};
use crate::extract::normalize::to_three_digits;

/// A maximal digit run of exactly three digits.
///
/// Runs that are part of longer numbers never match, and repeated-digit
/// values ("000", "111", ... "999") are treated as noise.
pub struct BareDigitsRule;

impl CandidateRule for BareDigitsRule {
    fn kind(&self) -> RuleKind {
        RuleKind::BareDigits
    }

    fn find(&self, text: &str) -> Vec<RuleHit> {
        DIGIT_RUN
            .find_iter(text)
            .filter(|m| m.as_str().chars().count() == 3)
            .filter_map(|m| {
                let number = to_three_digits(m.as_str())?;
                if number.is_repdigit() {
                    return None;
                }
                Some(RuleHit::new(number, m.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(text: &str) -> Vec<String> {
        BareDigitsRule
            .find(text)
            .into_iter()
            .map(|h| h.number.to_string())
            .collect()
    }

    #[test]
    fn test_only_exact_three_digit_runs() {
        assert_eq!(numbers("ทางหลวง 304 ปี 2567 รถ 18 ล้อ"), vec!["304"]);
    }

    #[test]
    fn test_repdigits_excluded() {
        assert!(numbers("111 999 000").is_empty());
        assert_eq!(numbers("111 112"), vec!["112"]);
    }

    #[test]
    fn test_thai_numerals() {
        assert_eq!(numbers("งวดนี้ ๔๓๘"), vec!["438"]);
    }
}
