//! Flight numbers.

use super::patterns::FLIGHT_NUMBER;
use super::{trailing_digit_hits, CandidateRule, RuleHit, RuleKind};

/// "เที่ยวบิน TG 628", "flight FD3216".
pub struct FlightNumberRule;

impl CandidateRule for FlightNumberRule {
    fn kind(&self) -> RuleKind {
        RuleKind::FlightNumber
    }

    fn find(&self, text: &str) -> Vec<RuleHit> {
        trailing_digit_hits(&FLIGHT_NUMBER, text, 1, |_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_with_airline_code() {
        let hits = FlightNumberRule.find("เที่ยวบิน TG 628 ลงจอดฉุกเฉิน");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].number.as_str(), "628");
    }

    #[test]
    fn test_flight_four_digits_case_insensitive() {
        let hits = FlightNumberRule.find("Flight fd3216 was delayed");
        assert_eq!(hits[0].number.as_str(), "216");
    }

    #[test]
    fn test_flight_needs_three_digits() {
        assert!(FlightNumberRule.find("flight 12").is_empty());
    }
}
