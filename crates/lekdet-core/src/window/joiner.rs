//! Temporal window join between articles and lottery draws.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::draw::start_of_day;
use crate::models::{Article, LotteryDraw, LotteryNumber};

use super::frequency::FrequencyTable;

/// Default window length preceding a draw.
pub const DEFAULT_WINDOW_DAYS: u32 = 15;

/// Half-open time span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AttributionWindow {
    /// The `days` preceding `end`, starting no earlier than the first representable instant.
    pub fn before(end: DateTime<Utc>, days: u32) -> Self {
        Self {
            start: days_before(end, days),
            end,
        }
    }

    /// Start-inclusive, end-exclusive.
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        *at >= self.start && *at < self.end
    }

    /// Same start with the end pulled back to `limit` if that is earlier.
    pub fn clipped(&self, limit: DateTime<Utc>) -> Self {
        Self {
            start: self.start,
            end: self.end.min(limit),
        }
    }
}

/// `at` minus `days` whole days, saturating at [`DateTime::<Utc>::MIN_UTC`].
pub fn days_before(at: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(days.into())
        .and_then(|span| at.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// A number mentioned in a window, with how many articles mentioned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub number: LotteryNumber,
    pub frequency: usize,
    pub is_match: bool,
}

/// Window analysis for one historical draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawAnalysis {
    pub draw_id: u64,
    pub draw_date: NaiveDate,
    pub last_three: LotteryNumber,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub news_count: usize,
    pub ranked_candidates: Vec<RankedCandidate>,
    pub has_match: bool,
}

impl DrawAnalysis {
    /// 1-based rank of the drawn number among the candidates.
    pub fn match_rank(&self) -> Option<usize> {
        self.ranked_candidates
            .iter()
            .position(|c| c.is_match)
            .map(|i| i + 1)
    }

    /// The first `n` ranked candidates.
    pub fn top(&self, n: usize) -> &[RankedCandidate] {
        &self.ranked_candidates[..n.min(self.ranked_candidates.len())]
    }
}

/// Window projection for the next, not yet drawn, draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDraw {
    pub draw_date: NaiveDate,
    pub window_start: DateTime<Utc>,
    /// Nominal end (the draw date).
    pub window_end: DateTime<Utc>,
    /// Where article selection actually stopped.
    pub selection_end: DateTime<Utc>,
    pub news_count: usize,
    pub ranked_candidates: Vec<RankedCandidate>,
}

/// Aligns article candidates to the window preceding each draw.
#[derive(Debug, Clone, Copy)]
pub struct WindowJoiner {
    window_days: u32,
}

impl WindowJoiner {
    pub fn new(window_days: u32) -> Self {
        Self { window_days }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// The attribution window ending at the start of `draw_date`.
    pub fn window_for(&self, draw_date: NaiveDate) -> AttributionWindow {
        AttributionWindow::before(start_of_day(draw_date), self.window_days)
    }

    /// Articles published inside `window`, in input order.
    pub fn select<'a>(&self, window: &AttributionWindow, articles: &'a [Article]) -> Vec<&'a Article> {
        articles
            .iter()
            .filter(|a| window.contains(&a.published_at))
            .collect()
    }

    /// Rank the candidate numbers of `articles`, flagging `target`.
    ///
    /// Each article counts once per number. Ties keep the order in which
    /// numbers were first met walking `articles` in order.
    pub fn rank(articles: &[&Article], target: Option<&LotteryNumber>) -> Vec<RankedCandidate> {
        articles
            .iter()
            .flat_map(|a| a.candidates.iter().map(|c| &c.number))
            .collect::<FrequencyTable>()
            .ranked()
            .into_iter()
            .map(|(number, frequency)| RankedCandidate {
                is_match: target == Some(&number),
                number,
                frequency,
            })
            .collect()
    }

    /// Analyse one draw against its pre-draw window.
    pub fn analyze_draw(&self, draw: &LotteryDraw, articles: &[Article]) -> DrawAnalysis {
        let window = self.window_for(draw.draw_date);
        let selected = self.select(&window, articles);
        let ranked_candidates = Self::rank(&selected, Some(&draw.last_three));
        let has_match = ranked_candidates.iter().any(|c| c.is_match);

        debug!(
            "Draw {}: {} articles, {} numbers, match={}",
            draw.draw_date,
            selected.len(),
            ranked_candidates.len(),
            has_match
        );

        DrawAnalysis {
            draw_id: draw.id,
            draw_date: draw.draw_date,
            last_three: draw.last_three.clone(),
            window_start: window.start,
            window_end: window.end,
            news_count: selected.len(),
            ranked_candidates,
            has_match,
        }
    }

    /// Analyse the most recent `limit` draws (all if `None`), newest first.
    ///
    /// Draws are independent and analysed in parallel.
    pub fn analyze_history(
        &self,
        draws: &[LotteryDraw],
        articles: &[Article],
        limit: Option<usize>,
    ) -> Vec<DrawAnalysis> {
        let mut recent: Vec<&LotteryDraw> = draws.iter().collect();
        recent.sort_by(|a, b| b.draw_date.cmp(&a.draw_date));
        recent.truncate(limit.unwrap_or(recent.len()));

        let mut analyses: Vec<DrawAnalysis> = recent
            .par_iter()
            .map(|draw| self.analyze_draw(draw, articles))
            .collect();
        analyses.sort_by(|a, b| b.draw_date.cmp(&a.draw_date));
        analyses
    }

    /// Project the window for an upcoming draw on `draw_date`.
    ///
    /// Selection stops at `now`; the reported window end stays the draw date.
    pub fn analyze_upcoming(
        &self,
        draw_date: NaiveDate,
        now: DateTime<Utc>,
        articles: &[Article],
    ) -> UpcomingDraw {
        let window = self.window_for(draw_date);
        let selection = window.clipped(now);
        let selected = self.select(&selection, articles);

        UpcomingDraw {
            draw_date,
            window_start: window.start,
            window_end: window.end,
            selection_end: selection.end,
            news_count: selected.len(),
            ranked_candidates: Self::rank(&selected, None),
        }
    }
}

impl Default for WindowJoiner {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_DAYS)
    }
}
