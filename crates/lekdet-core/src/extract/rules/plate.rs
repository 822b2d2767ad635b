//! Vehicle license plate numbers.

use super::patterns::LICENSE_PLATE;
use super::{preceded_by_thai, trailing_digit_hits, CandidateRule, RuleHit, RuleKind};

/// One or two Thai consonants followed by up to four digits ("กข 1234").
///
/// The letters must start a token, so a word ending in a consonant followed
/// by a count ("เสียชีวิต 5 คน") is not read as a plate.
pub struct LicensePlateRule;

impl CandidateRule for LicensePlateRule {
    fn kind(&self) -> RuleKind {
        RuleKind::LicensePlate
    }

    fn find(&self, text: &str) -> Vec<RuleHit> {
        trailing_digit_hits(&LICENSE_PLATE, text, 2, |start| !preceded_by_thai(text, start))
    }
}
