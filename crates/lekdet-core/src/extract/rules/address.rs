//! Address numbers and kilometer markers.

use super::patterns::{ADDRESS_NUMBER, KILOMETER_MARKER};
use super::{trailing_digit_hits, CandidateRule, RuleHit, RuleKind};

/// "บ้านเลขที่ 99/1", "เลขที่ 567", "อาคาร 12".
pub struct AddressNumberRule;

impl CandidateRule for AddressNumberRule {
    fn kind(&self) -> RuleKind {
        RuleKind::AddressNumber
    }

    fn find(&self, text: &str) -> Vec<RuleHit> {
        trailing_digit_hits(&ADDRESS_NUMBER, text, 2, |_| true)
    }
}

/// "กม.ที่ 234", "กม. 156", "กิโลเมตรที่ 12".
pub struct KilometerMarkerRule;

impl CandidateRule for KilometerMarkerRule {
    fn kind(&self) -> RuleKind {
        RuleKind::KilometerMarker
    }

    fn find(&self, text: &str) -> Vec<RuleHit> {
        trailing_digit_hits(&KILOMETER_MARKER, text, 2, |_| true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_number() {
        let hits = AddressNumberRule.find("บริษัท ไทยพลาสติก จำกัด เลขที่ 567 หมู่ 8");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].number.as_str(), "567");
    }

    #[test]
    fn test_house_number_keeps_last_three() {
        let hits = AddressNumberRule.find("บ้านเลขที่ 1459 ถนนพหลโยธิน");
        assert_eq!(hits[0].number.as_str(), "459");
        assert_eq!(hits[0].source, "บ้านเลขที่ 1459");
    }

    #[test]
    fn test_building_number_padded() {
        let hits = AddressNumberRule.find("ณ อาคาร 99 ปี สภากาชาดไทย");
        assert_eq!(hits[0].number.as_str(), "099");
    }

    #[test]
    fn test_kilometer_marker() {
        let hits = KilometerMarkerRule.find("บนถนนมิตรภาพ กม.ที่ 234 ต.หนองบัวระเหว");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].number.as_str(), "234");
    }
}
