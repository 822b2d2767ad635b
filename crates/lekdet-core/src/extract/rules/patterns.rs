//! Regex patterns for Thai news number extraction.
//!
//! Digit classes accept both ASCII and Thai numerals (๐-๙).

use lazy_static::lazy_static;
use regex::Regex;

/// Full and abbreviated Thai month names with their ordinal.
pub const THAI_MONTHS: [(&str, &str, u32); 12] = [
    ("มกราคม", "ม.ค.", 1),
    ("กุมภาพันธ์", "ก.พ.", 2),
    ("มีนาคม", "มี.ค.", 3),
    ("เมษายน", "เม.ย.", 4),
    ("พฤษภาคม", "พ.ค.", 5),
    ("มิถุนายน", "มิ.ย.", 6),
    ("กรกฎาคม", "ก.ค.", 7),
    ("สิงหาคม", "ส.ค.", 8),
    ("กันยายน", "ก.ย.", 9),
    ("ตุลาคม", "ต.ค.", 10),
    ("พฤศจิกายน", "พ.ย.", 11),
    ("ธันวาคม", "ธ.ค.", 12),
];

/// Month ordinal for a full or abbreviated Thai month name.
pub fn thai_month_number(name: &str) -> Option<u32> {
    THAI_MONTHS
        .iter()
        .find(|(full, short, _)| *full == name || *short == name)
        .map(|(_, _, n)| *n)
}

fn month_alternation() -> String {
    let full = THAI_MONTHS.iter().map(|(full, _, _)| regex::escape(full));
    let short = THAI_MONTHS.iter().map(|(_, short, _)| regex::escape(short));
    full.chain(short).collect::<Vec<_>>().join("|")
}

lazy_static! {
    // Vehicle plate: "กข 1234", "1กฮ 892"
    pub static ref LICENSE_PLATE: Regex = Regex::new(
        r"([ก-ฮ]{1,2})\s*([0-9๐-๙]{1,4})"
    ).unwrap();

    // House / building number
    pub static ref ADDRESS_NUMBER: Regex = Regex::new(
        r"(บ้านเลขที่|เลขที่|อาคาร)\s*([0-9๐-๙]{1,4})"
    ).unwrap();

    // Kilometer marker: "กม.ที่ 234", "กม. 156", "กิโลเมตรที่ 12"
    pub static ref KILOMETER_MARKER: Regex = Regex::new(
        r"(กม\.?|กิโลเมตร)\s*(?:ที่)?\s*([0-9๐-๙]{1,4})"
    ).unwrap();

    // Day followed by a month name: "15 มกราคม", "5 ธ.ค."
    pub static ref CALENDAR_DATE: Regex = Regex::new(
        &format!(r"([0-9๐-๙]{{1,2}})\s*({})", month_alternation())
    ).unwrap();

    // Age: "อายุ 35 ปี"
    pub static ref AGE: Regex = Regex::new(
        r"อายุ\s*([0-9๐-๙]{1,3})\s*ปี"
    ).unwrap();

    // Casualty count: "เสียชีวิต 5 ราย", "ดับ 3 ศพ", "บาดเจ็บ 23 คน"
    pub static ref CASUALTY: Regex = Regex::new(
        r"(เสียชีวิต|ดับ|ตาย|บาดเจ็บ)\s*([0-9๐-๙]{1,3})\s*(คน|ราย|ศพ)"
    ).unwrap();

    // Flight number: "เที่ยวบิน TG 628", "flight 1234"
    pub static ref FLIGHT_NUMBER: Regex = Regex::new(
        r"(?i)(?:เที่ยวบิน|flight)\s*(?:[A-Z]{2})?\s*([0-9๐-๙]{3,4})"
    ).unwrap();

    // Any maximal digit run
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"[0-9๐-๙]+"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_lookup() {
        assert_eq!(thai_month_number("มกราคม"), Some(1));
        assert_eq!(thai_month_number("ธ.ค."), Some(12));
        assert_eq!(thai_month_number("มี.ค."), Some(3));
        assert_eq!(thai_month_number("january"), None);
    }

    #[test]
    fn test_calendar_date_prefers_full_names() {
        let caps = CALENDAR_DATE.captures("วันที่ 28 มีนาคม 2567").unwrap();
        assert_eq!(&caps[1], "28");
        assert_eq!(&caps[2], "มีนาคม");

        let caps = CALENDAR_DATE.captures("5 ธ.ค.").unwrap();
        assert_eq!(&caps[2], "ธ.ค.");
    }

    #[test]
    fn test_kilometer_marker_forms() {
        assert_eq!(&KILOMETER_MARKER.captures("กม.ที่ 234").unwrap()[2], "234");
        assert_eq!(&KILOMETER_MARKER.captures("กม. 156").unwrap()[2], "156");
        assert_eq!(&KILOMETER_MARKER.captures("กิโลเมตรที่ 12").unwrap()[2], "12");
    }
}
