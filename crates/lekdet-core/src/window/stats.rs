//! Aggregate statistics over draw analyses and reference data.

use serde::{Deserialize, Serialize};

use crate::models::{LotteryDraw, LotteryNumber};

use super::frequency::FrequencyTable;
use super::joiner::DrawAnalysis;

/// Hit-rate summary over a set of analysed draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    /// Draws analysed.
    pub draws: usize,
    /// Draws whose window held at least one article.
    pub draws_with_news: usize,
    /// Draws whose outcome appeared among the window's candidates.
    pub hits: usize,
    /// `hits / draws` as a percentage; 0 when no draws.
    pub match_rate: f64,
    /// Mean 1-based rank of the drawn number over hits.
    pub mean_hit_rank: Option<f64>,
}

impl HistorySummary {
    pub fn from_analyses(analyses: &[DrawAnalysis]) -> Self {
        let draws = analyses.len();
        let draws_with_news = analyses.iter().filter(|a| a.news_count > 0).count();
        let ranks: Vec<usize> = analyses.iter().filter_map(DrawAnalysis::match_rank).collect();
        let hits = ranks.len();

        let match_rate = if draws > 0 {
            hits as f64 / draws as f64 * 100.0
        } else {
            0.0
        };
        let mean_hit_rank =
            (hits > 0).then(|| ranks.iter().sum::<usize>() as f64 / hits as f64);

        Self {
            draws,
            draws_with_news,
            hits,
            match_rate,
            mean_hit_rank,
        }
    }
}

/// How often each last-three value was drawn, most frequent first.
pub fn last_three_frequency(draws: &[LotteryDraw]) -> Vec<(LotteryNumber, usize)> {
    draws
        .iter()
        .map(|d| &d.last_three)
        .collect::<FrequencyTable>()
        .ranked()
}
