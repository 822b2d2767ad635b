//! Calendar dates written as day + Thai month name.

use super::patterns::{thai_month_number, CALENDAR_DATE};
use super::{preceded_by_digit, CandidateRule, RuleHit, RuleKind};
use crate::extract::normalize::{digit_value, to_three_digits};

/// "15 มกราคม" -> day "15" + month "1" -> "151".
///
/// The zero-padded day and the month ordinal are concatenated and the last
/// three digits kept: "5 ธันวาคม" -> "0512" -> "512".
pub struct CalendarDateRule;

impl CandidateRule for CalendarDateRule {
    fn kind(&self) -> RuleKind {
        RuleKind::CalendarDate
    }

    fn find(&self, text: &str) -> Vec<RuleHit> {
        let mut results = Vec::new();

        for caps in CALENDAR_DATE.captures_iter(text) {
            let full_match = caps.get(0).unwrap();
            if preceded_by_digit(text, full_match.start()) {
                continue;
            }

            let Some(day) = digit_value(&caps[1]).filter(|d| (1..=31).contains(d)) else {
                continue;
            };
            let Some(month) = thai_month_number(&caps[2]) else {
                continue;
            };

            if let Some(number) = to_three_digits(&format!("{:02}{}", day, month)) {
                results.push(
                    RuleHit::new(number, full_match.as_str())
                        .with_detail(format!("{} ({}/{})", full_match.as_str(), day, month)),
                );
            }
        }

        results
    }
}
