//! Digit-run normalization to the canonical 3-digit form.

use crate::models::LotteryNumber;

/// Fold Thai digits (๐-๙) to ASCII.
///
/// Returns `None` if `raw` is empty or holds anything other than digits.
pub fn fold_digits(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    raw.chars()
        .map(|c| match c {
            '0'..='9' => Some(c),
            '\u{0E50}'..='\u{0E59}' => char::from_digit(c as u32 - 0x0E50, 10),
            _ => None,
        })
        .collect()
}

/// Keep the last three digits of a run, left-padding with zeros.
///
/// "1234" -> "234", "5" -> "005", "๕๖๗" -> "567".
pub fn to_three_digits(raw: &str) -> Option<LotteryNumber> {
    let digits = fold_digits(raw)?;
    let tail = &digits[digits.len().saturating_sub(3)..];
    LotteryNumber::parse(&format!("{:0>3}", tail))
}

/// Numeric value of a digit run, if it fits in a `u32`.
pub fn digit_value(raw: &str) -> Option<u32> {
    fold_digits(raw)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_three_digits() {
        assert_eq!(to_three_digits("1234").unwrap().as_str(), "234");
        assert_eq!(to_three_digits("5").unwrap().as_str(), "005");
        assert_eq!(to_three_digits("42").unwrap().as_str(), "042");
        assert_eq!(to_three_digits("901").unwrap().as_str(), "901");
    }

    #[test]
    fn test_thai_digits_are_folded() {
        assert_eq!(fold_digits("๒๕๖๗").as_deref(), Some("2567"));
        assert_eq!(to_three_digits("๕๖๗").unwrap().as_str(), "567");
        assert_eq!(digit_value("๑๒"), Some(12));
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(to_three_digits("").is_none());
        assert!(to_three_digits("12a").is_none());
        assert!(fold_digits(" 12").is_none());
    }
}
