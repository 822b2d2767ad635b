//! Next-draw projection.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

use crate::models::draw::start_of_day;

/// Draw dates: scheduled reference dates first, a day-of-month rule otherwise.
///
/// Real draws shift around holidays (the 2nd or 17th instead of the 1st or
/// 16th), so known dates from reference data take precedence over the rule.
#[derive(Debug, Clone)]
pub struct DrawCalendar {
    draw_days: Vec<u32>,
    scheduled: Vec<NaiveDate>,
}

impl DrawCalendar {
    pub fn new(draw_days: impl Into<Vec<u32>>) -> Self {
        let mut draw_days = draw_days.into();
        draw_days.sort_unstable();
        draw_days.dedup();
        Self {
            draw_days,
            scheduled: Vec::new(),
        }
    }

    /// Add known draw dates.
    pub fn with_scheduled(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.scheduled.extend(dates);
        self.scheduled.sort_unstable();
        self.scheduled.dedup();
        self
    }

    /// The first draw date whose start lies strictly after `now`.
    pub fn next_draw_after(&self, now: DateTime<Utc>) -> Option<NaiveDate> {
        if let Some(date) = self.scheduled.iter().find(|d| start_of_day(**d) > now) {
            return Some(*date);
        }

        let first_of_month = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)?;
        (0..13).find_map(|offset| {
            let month = first_of_month.checked_add_months(Months::new(offset))?;
            self.draw_days
                .iter()
                .filter_map(|day| month.with_day(*day))
                .find(|date| start_of_day(*date) > now)
        })
    }
}

impl Default for DrawCalendar {
    fn default() -> Self {
        Self::new(vec![1, 16])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_next_draw_same_month() {
        let calendar = DrawCalendar::default();
        assert_eq!(calendar.next_draw_after(at(2024, 12, 10, 12)), Some(date("2024-12-16")));
    }

    #[test]
    fn test_draw_day_itself_rolls_over() {
        let calendar = DrawCalendar::default();
        assert_eq!(calendar.next_draw_after(at(2024, 12, 16, 8)), Some(date("2025-01-01")));
        assert_eq!(calendar.next_draw_after(at(2024, 12, 1, 0)), Some(date("2024-12-16")));
    }

    #[test]
    fn test_scheduled_dates_take_precedence() {
        let calendar = DrawCalendar::default()
            .with_scheduled([date("2025-01-02"), date("2024-12-16")]);
        assert_eq!(calendar.next_draw_after(at(2024, 12, 20, 0)), Some(date("2025-01-02")));

        // past schedule falls back to the rule
        assert_eq!(calendar.next_draw_after(at(2025, 1, 5, 0)), Some(date("2025-01-16")));
    }

    #[test]
    fn test_days_missing_in_short_months() {
        let calendar = DrawCalendar::new(vec![30]);
        assert_eq!(calendar.next_draw_after(at(2025, 1, 31, 0)), Some(date("2025-03-30")));
    }

    #[test]
    fn test_no_rule() {
        assert_eq!(DrawCalendar::new(Vec::new()).next_draw_after(at(2025, 1, 1, 0)), None);
    }
}
