//! Ages and casualty counts.

use super::patterns::{AGE, CASUALTY};
use super::{CandidateRule, RuleHit, RuleKind};
use crate::extract::normalize::{digit_value, to_three_digits};

/// "อายุ 35 ปี"; ages of 150 or more are ignored.
pub struct AgeRule;

impl CandidateRule for AgeRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Age
    }

    fn find(&self, text: &str) -> Vec<RuleHit> {
        AGE.captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let age = digit_value(&caps[1]).filter(|age| *age < 150)?;
                let number = to_three_digits(&caps[1])?;
                Some(RuleHit::new(number, full.as_str()).with_detail(format!("{} years", age)))
            })
            .collect()
    }
}

/// "(เสียชีวิต|ดับ|ตาย|บาดเจ็บ) N (คน|ราย|ศพ)".
pub struct CasualtyRule;

impl CandidateRule for CasualtyRule {
    fn kind(&self) -> RuleKind {
        RuleKind::Casualty
    }

    fn find(&self, text: &str) -> Vec<RuleHit> {
        CASUALTY
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let number = to_three_digits(&caps[2])?;
                Some(
                    RuleHit::new(number, full.as_str())
                        .with_detail(format!("{} {} {}", &caps[1], &caps[2], &caps[3])),
                )
            })
            .collect()
    }
}
