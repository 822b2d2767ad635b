//! Lottery draw reference data.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LekdetError, Result};

use super::candidate::LotteryNumber;

/// A historical lottery result.
///
/// Draw dates are reference data: nominally the 1st and 16th of the month,
/// with shifted dates (2nd, 17th) around holidays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryDraw {
    #[serde(default)]
    pub id: u64,

    #[serde(rename = "date", alias = "drawDate")]
    pub draw_date: NaiveDate,

    pub last_three: LotteryNumber,

    /// Six-digit first prize.
    #[serde(rename = "firstPrize", alias = "firstPrizeFull")]
    pub first_prize_full: String,
}

impl LotteryDraw {
    /// Create a draw from its date and six-digit first prize.
    pub fn new(id: u64, draw_date: NaiveDate, first_prize_full: &str) -> Result<Self> {
        let last_three = first_prize_full
            .get(3..)
            .and_then(LotteryNumber::parse)
            .ok_or_else(|| invalid(draw_date, "first prize must be six digits"))?;

        let draw = Self {
            id,
            draw_date,
            last_three,
            first_prize_full: first_prize_full.to_string(),
        };
        draw.validate()?;
        Ok(draw)
    }

    /// Check the first prize is six digits ending in `last_three`.
    pub fn validate(&self) -> Result<()> {
        let prize = &self.first_prize_full;
        if prize.len() != 6 || !prize.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(self.draw_date, "first prize must be six digits"));
        }
        if !prize.ends_with(self.last_three.as_str()) {
            return Err(invalid(
                self.draw_date,
                &format!("last three {} does not end first prize {}", self.last_three, prize),
            ));
        }
        Ok(())
    }

    /// Start of the draw day; the end of its attribution window.
    pub fn starts_at(&self) -> DateTime<Utc> {
        start_of_day(self.draw_date)
    }
}

/// Midnight UTC of a calendar date.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Parse and validate a JSON array of draws, numbering ids from 1 when absent.
pub fn parse_draws_json(json: &str) -> Result<Vec<LotteryDraw>> {
    let mut draws: Vec<LotteryDraw> = serde_json::from_str(json)?;
    for (index, draw) in draws.iter_mut().enumerate() {
        draw.validate()?;
        if draw.id == 0 {
            draw.id = index as u64 + 1;
        }
    }
    Ok(draws)
}

fn invalid(date: NaiveDate, reason: &str) -> LekdetError {
    LekdetError::InvalidDraw {
        date: date.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_last_three() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let draw = LotteryDraw::new(1, date, "163438").unwrap();
        assert_eq!(draw.last_three.as_str(), "438");
        assert_eq!(draw.starts_at().to_rfc3339(), "2024-12-16T00:00:00+00:00");
    }

    #[test]
    fn test_new_rejects_short_prize() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        assert!(LotteryDraw::new(1, date, "43").is_err());
        assert!(LotteryDraw::new(1, date, "16343x").is_err());
    }

    #[test]
    fn test_parse_draws_json() {
        let json = r#"[
            { "date": "2025-01-17", "lastThree": "893", "firstPrize": "108893" },
            { "date": "2025-01-02", "lastThree": "627", "firstPrize": "541627" }
        ]"#;
        let draws = parse_draws_json(json).unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].id, 1);
        assert_eq!(draws[1].draw_date, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[test]
    fn test_parse_draws_json_rejects_mismatch() {
        let json = r#"[{ "date": "2025-01-17", "lastThree": "111", "firstPrize": "108893" }]"#;
        assert!(matches!(
            parse_draws_json(json),
            Err(LekdetError::InvalidDraw { .. })
        ));
    }
}
