//! Classification of candidates against draw outcomes.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StoreError;
use crate::models::{Article, LotteryDraw, LotteryNumber};
use crate::window::WindowJoiner;

/// How a candidate relates to a drawn number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Same three digits in the same order.
    Exact,
    /// Same digits in a different order.
    Partial,
}

impl MatchKind {
    pub fn classify(candidate: &LotteryNumber, drawn: &LotteryNumber) -> Option<Self> {
        if candidate == drawn {
            Some(Self::Exact)
        } else if candidate.is_permutation_of(drawn) {
            Some(Self::Partial)
        } else {
            None
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Partial => f.write_str("partial"),
        }
    }
}

/// A candidate from an article published before the draw it matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub candidate_number: LotteryNumber,
    pub article_id: u64,
    pub article_published_at: DateTime<Utc>,
    pub draw_id: u64,
    pub draw_date: NaiveDate,
    pub last_three: LotteryNumber,
    pub kind: MatchKind,
}

impl Match {
    /// Classify `number` from `article` against `draw`.
    ///
    /// `None` unless the article was published on or before the draw date and
    /// the number matches exactly or partially.
    pub fn new(article: &Article, number: &LotteryNumber, draw: &LotteryDraw) -> Option<Self> {
        if article.published_at > draw.starts_at() {
            return None;
        }
        let kind = MatchKind::classify(number, &draw.last_three)?;

        Some(Self {
            candidate_number: number.clone(),
            article_id: article.id,
            article_published_at: article.published_at,
            draw_id: draw.id,
            draw_date: draw.draw_date,
            last_three: draw.last_three.clone(),
            kind,
        })
    }

    /// Identity used to avoid recording the same match twice.
    pub fn key(&self) -> (u64, &LotteryNumber, NaiveDate) {
        (self.article_id, &self.candidate_number, self.draw_date)
    }
}

/// Persistence boundary for classified matches.
pub trait MatchRecorder {
    /// Store a match; `Ok(false)` if an identical match is already stored.
    fn record(&mut self, m: &Match) -> Result<bool, StoreError>;
}

/// Matches for every draw, taken from the articles in its pre-draw window.
///
/// Draws newest first; within a draw, article order then candidate order.
pub fn collect_matches(
    joiner: &WindowJoiner,
    draws: &[LotteryDraw],
    articles: &[Article],
) -> Vec<Match> {
    let mut ordered: Vec<&LotteryDraw> = draws.iter().collect();
    ordered.sort_by(|a, b| b.draw_date.cmp(&a.draw_date));

    ordered
        .into_iter()
        .flat_map(|draw| {
            let window = joiner.window_for(draw.draw_date);
            joiner
                .select(&window, articles)
                .into_iter()
                .flat_map(move |article| {
                    article
                        .candidates
                        .iter()
                        .filter_map(move |c| Match::new(article, &c.number, draw))
                })
        })
        .collect()
}

/// Outcome of recording a batch of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    pub recorded: usize,
    pub duplicates: usize,
    pub failed: usize,
}

/// Record matches one by one; a failed insert does not stop the batch.
pub fn record_matches<R: MatchRecorder + ?Sized>(recorder: &mut R, matches: &[Match]) -> RecordReport {
    let mut report = RecordReport::default();

    for m in matches {
        match recorder.record(m) {
            Ok(true) => report.recorded += 1,
            Ok(false) => report.duplicates += 1,
            Err(e) => {
                warn!(
                    "Failed to record match {} for draw {}: {}",
                    m.candidate_number, m.draw_date, e
                );
                report.failed += 1;
            }
        }
    }

    report
}

/// Counts over recorded matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub total_matches: usize,
    pub exact_matches: usize,
    pub partial_matches: usize,
    /// Exact matches per extracted candidate, as a percentage.
    pub accuracy: f64,
}

impl MatchSummary {
    pub fn new(matches: &[Match], total_candidates: usize) -> Self {
        let exact_matches = matches.iter().filter(|m| m.kind == MatchKind::Exact).count();
        let partial_matches = matches.len() - exact_matches;
        let accuracy = if total_candidates > 0 {
            exact_matches as f64 / total_candidates as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_matches: matches.len(),
            exact_matches,
            partial_matches,
            accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, ExtractionMethod, NewsCategory, NewsSource};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn n(s: &str) -> LotteryNumber {
        LotteryNumber::parse(s).unwrap()
    }

    fn article(id: u64, day: u32, numbers: &[&str]) -> Article {
        let published_at = Utc.with_ymd_and_hms(2024, 12, day, 9, 0, 0).unwrap();
        Article {
            id,
            title: String::new(),
            body: String::new(),
            source: NewsSource::Khaosod,
            category: NewsCategory::Accident,
            url: format!("https://example.com/{}", id),
            image_url: None,
            published_at,
            ingested_at: published_at,
            candidates: numbers
                .iter()
                .map(|s| Candidate::new(n(s), ExtractionMethod::Direct, "t", 80))
                .collect(),
        }
    }

    fn draw() -> LotteryDraw {
        LotteryDraw::new(7, "2024-12-16".parse().unwrap(), "163438").unwrap()
    }

    struct VecRecorder {
        seen: HashSet<(u64, LotteryNumber, NaiveDate)>,
        fail_on: Option<LotteryNumber>,
    }

    impl MatchRecorder for VecRecorder {
        fn record(&mut self, m: &Match) -> Result<bool, StoreError> {
            if self.fail_on.as_ref() == Some(&m.candidate_number) {
                return Err(StoreError::InvalidArticle("boom".to_string()));
            }
            Ok(self.seen.insert((m.article_id, m.candidate_number.clone(), m.draw_date)))
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(MatchKind::classify(&n("438"), &n("438")), Some(MatchKind::Exact));
        assert_eq!(MatchKind::classify(&n("384"), &n("438")), Some(MatchKind::Partial));
        assert_eq!(MatchKind::classify(&n("439"), &n("438")), None);
    }

    #[test]
    fn test_causality() {
        let late = article(1, 20, &["438"]);
        assert!(Match::new(&late, &n("438"), &draw()).is_none());

        let early = article(2, 10, &["438"]);
        let m = Match::new(&early, &n("438"), &draw()).unwrap();
        assert_eq!(m.kind, MatchKind::Exact);
        assert_eq!(m.draw_id, 7);
    }

    #[test]
    fn test_collect_matches_uses_window() {
        let articles = vec![
            article(1, 10, &["438", "100"]),
            article(2, 12, &["843"]),
            article(3, 16, &["438"]),
            article(4, 17, &["438"]),
        ];
        let matches = collect_matches(&WindowJoiner::default(), &[draw()], &articles);

        let found: Vec<(u64, &str, MatchKind)> = matches
            .iter()
            .map(|m| (m.article_id, m.candidate_number.as_str(), m.kind))
            .collect();
        assert_eq!(
            found,
            vec![(1, "438", MatchKind::Exact), (2, "843", MatchKind::Partial)]
        );
    }

    #[test]
    fn test_record_matches_isolates_failures() {
        let articles = vec![article(1, 10, &["438", "384"])];
        let matches = collect_matches(&WindowJoiner::default(), &[draw()], &articles);
        let mut recorder = VecRecorder {
            seen: HashSet::new(),
            fail_on: Some(n("384")),
        };

        let report = record_matches(&mut recorder, &matches);
        assert_eq!(report, RecordReport { recorded: 1, duplicates: 0, failed: 1 });

        let again = record_matches(&mut recorder, &matches);
        assert_eq!(again, RecordReport { recorded: 0, duplicates: 1, failed: 1 });
    }

    #[test]
    fn test_summary_accuracy() {
        let articles = vec![article(1, 10, &["438", "384"])];
        let matches = collect_matches(&WindowJoiner::default(), &[draw()], &articles);
        let summary = MatchSummary::new(&matches, 4);

        assert_eq!(summary.exact_matches, 1);
        assert_eq!(summary.partial_matches, 1);
        assert!((summary.accuracy - 25.0).abs() < f64::EPSILON);
    }
}
