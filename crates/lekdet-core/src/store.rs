//! Article store: the persistence boundary used by ingest, matching and
//! retention, plus an in-memory implementation that snapshots to JSON.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::matching::{Match, MatchRecorder};
use crate::models::{Article, Candidate, LotteryNumber, NewsCategory, ScrapedArticle};
use crate::window::{days_before, FrequencyTable};

/// Storage operations the engines rely on.
pub trait ArticleStore {
    fn find_by_url(&self, url: &str) -> Option<&Article>;

    /// Create an article from a scraped record; fails on a duplicate url.
    fn create(
        &mut self,
        scraped: ScrapedArticle,
        category: NewsCategory,
        candidates: Vec<Candidate>,
        ingested_at: DateTime<Utc>,
    ) -> std::result::Result<u64, StoreError>;

    /// Attach candidates to an existing article, skipping numbers it already has.
    fn attach_candidates(
        &mut self,
        id: u64,
        candidates: Vec<Candidate>,
    ) -> std::result::Result<usize, StoreError>;

    /// All articles, most recently published first.
    fn articles(&self) -> &[Article];

    fn count_candidates(&self) -> usize {
        self.articles().iter().map(|a| a.candidates.len()).sum()
    }

    /// Numbers by how many articles mention them, most mentioned first.
    fn number_frequency(&self, limit: usize) -> Vec<(LotteryNumber, usize)> {
        let mut ranked = self
            .articles()
            .iter()
            .flat_map(|a| a.candidates.iter().map(|c| &c.number))
            .collect::<FrequencyTable>()
            .ranked();
        ranked.truncate(limit);
        ranked
    }

    /// Delete articles ingested before `cutoff` along with everything derived from them.
    fn purge_before(&mut self, cutoff: DateTime<Utc>) -> PurgeReport;
}

/// What a retention purge removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub articles: usize,
    pub candidates: usize,
    pub matches: usize,
}

/// Oldest ingest time kept under a retention horizon of `retention_days`.
pub fn retention_cutoff(now: DateTime<Utc>, retention_days: u32) -> DateTime<Utc> {
    days_before(now, retention_days)
}

/// In-memory store with JSON snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    next_id: u64,
    articles: Vec<Article>,
    #[serde(default)]
    matches: Vec<Match>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot; a missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No store at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let mut store: Self = serde_json::from_str(&content)?;
        store.sort_articles();
        info!(
            "Loaded {} articles and {} matches from {}",
            store.articles.len(),
            store.matches.len(),
            path.display()
        );
        Ok(store)
    }

    /// Write a snapshot, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn get(&self, id: u64) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    // Newest first; equal timestamps keep insertion order.
    fn sort_articles(&mut self) {
        self.articles
            .sort_by(|a, b| b.published_at.cmp(&a.published_at));
    }
}

impl ArticleStore for MemoryStore {
    fn find_by_url(&self, url: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.url == url)
    }

    fn create(
        &mut self,
        scraped: ScrapedArticle,
        category: NewsCategory,
        candidates: Vec<Candidate>,
        ingested_at: DateTime<Utc>,
    ) -> std::result::Result<u64, StoreError> {
        if scraped.url.trim().is_empty() {
            return Err(StoreError::InvalidArticle("empty url".to_string()));
        }
        if scraped.title.trim().is_empty() {
            return Err(StoreError::InvalidArticle(format!("empty title for {}", scraped.url)));
        }
        if self.find_by_url(&scraped.url).is_some() {
            return Err(StoreError::DuplicateUrl(scraped.url));
        }

        self.next_id += 1;
        let id = self.next_id;
        let mut article = Article::from_scraped(id, scraped, category, ingested_at);
        article.attach_candidates(candidates);

        let position = self
            .articles
            .iter()
            .position(|a| a.published_at < article.published_at)
            .unwrap_or(self.articles.len());
        self.articles.insert(position, article);

        Ok(id)
    }

    fn attach_candidates(
        &mut self,
        id: u64,
        candidates: Vec<Candidate>,
    ) -> std::result::Result<usize, StoreError> {
        self.articles
            .iter_mut()
            .find(|a| a.id == id)
            .map(|a| a.attach_candidates(candidates))
            .ok_or(StoreError::ArticleNotFound(id))
    }

    fn articles(&self) -> &[Article] {
        &self.articles
    }

    fn purge_before(&mut self, cutoff: DateTime<Utc>) -> PurgeReport {
        let (expired, kept): (Vec<Article>, Vec<Article>) = std::mem::take(&mut self.articles)
            .into_iter()
            .partition(|a| a.ingested_at < cutoff);
        self.articles = kept;

        let matches_before = self.matches.len();
        self.matches
            .retain(|m| !expired.iter().any(|a| a.id == m.article_id));

        let report = PurgeReport {
            articles: expired.len(),
            candidates: expired.iter().map(|a| a.candidates.len()).sum(),
            matches: matches_before - self.matches.len(),
        };
        info!(
            "Purged {} articles ingested before {}",
            report.articles, cutoff
        );
        report
    }
}

impl MatchRecorder for MemoryStore {
    fn record(&mut self, m: &Match) -> std::result::Result<bool, StoreError> {
        if self.get(m.article_id).is_none() {
            return Err(StoreError::ArticleNotFound(m.article_id));
        }
        if self.matches.iter().any(|existing| existing.key() == m.key()) {
            return Ok(false);
        }
        self.matches.push(m.clone());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{collect_matches, record_matches};
    use crate::models::{ExtractionMethod, LotteryDraw, NewsSource};
    use crate::window::WindowJoiner;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, 9, 0, 0).unwrap()
    }

    fn scraped(url: &str, published_at: DateTime<Utc>) -> ScrapedArticle {
        ScrapedArticle {
            title: format!("ข่าว {}", url),
            body: String::new(),
            url: url.to_string(),
            image_url: None,
            published_at,
            source: NewsSource::Matichon,
            category: None,
        }
    }

    fn candidates(numbers: &[&str]) -> Vec<Candidate> {
        numbers
            .iter()
            .map(|n| Candidate::new(LotteryNumber::parse(n).unwrap(), ExtractionMethod::Direct, "t", 75))
            .collect()
    }

    fn ids(store: &MemoryStore) -> Vec<u64> {
        store.articles().iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_create_orders_newest_first() {
        let mut store = MemoryStore::new();
        store.create(scraped("a", at(12, 10)), NewsCategory::Accident, vec![], at(12, 10)).unwrap();
        store.create(scraped("b", at(12, 16)), NewsCategory::Accident, vec![], at(12, 16)).unwrap();
        store.create(scraped("c", at(12, 1)), NewsCategory::Accident, vec![], at(12, 16)).unwrap();

        assert_eq!(ids(&store), vec![2, 1, 3]);
    }

    #[test]
    fn test_create_rejects_duplicates_and_blank_records() {
        let mut store = MemoryStore::new();
        store.create(scraped("a", at(12, 10)), NewsCategory::Royal, vec![], at(12, 10)).unwrap();

        let err = store
            .create(scraped("a", at(12, 11)), NewsCategory::Royal, vec![], at(12, 11))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUrl(url) if url == "a"));

        let err = store
            .create(scraped(" ", at(12, 11)), NewsCategory::Royal, vec![], at(12, 11))
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidArticle(_)));
        assert_eq!(store.articles().len(), 1);
    }

    #[test]
    fn test_attach_and_counts() {
        let mut store = MemoryStore::new();
        let a = store
            .create(scraped("a", at(12, 10)), NewsCategory::Accident, candidates(&["234", "151"]), at(12, 10))
            .unwrap();
        store
            .create(scraped("b", at(12, 11)), NewsCategory::Accident, candidates(&["151"]), at(12, 11))
            .unwrap();

        assert_eq!(store.attach_candidates(a, candidates(&["151", "999"])).unwrap(), 1);
        assert!(matches!(
            store.attach_candidates(42, candidates(&["111"])),
            Err(StoreError::ArticleNotFound(42))
        ));

        assert_eq!(store.count_candidates(), 4);
        let top = store.number_frequency(2);
        assert_eq!(top[0], (LotteryNumber::parse("151").unwrap(), 2));
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_purge_cascades_to_matches() {
        let mut store = MemoryStore::new();
        store
            .create(scraped("old", at(12, 10)), NewsCategory::Accident, candidates(&["438"]), at(12, 1))
            .unwrap();
        store
            .create(scraped("new", at(12, 12)), NewsCategory::Accident, candidates(&["438"]), at(12, 12))
            .unwrap();

        let draw = LotteryDraw::new(1, "2024-12-16".parse().unwrap(), "163438").unwrap();
        let matches = collect_matches(&WindowJoiner::default(), &[draw], store.articles());
        let recorded = record_matches(&mut store, &matches);
        assert_eq!(recorded.recorded, 2);

        let report = store.purge_before(retention_cutoff(at(12, 20), 15));
        assert_eq!(report, PurgeReport { articles: 1, candidates: 1, matches: 1 });
        assert_eq!(ids(&store), vec![2]);
        assert_eq!(store.matches().len(), 1);
    }

    #[test]
    fn test_huge_retention_keeps_everything() {
        assert_eq!(retention_cutoff(at(12, 20), u32::MAX), DateTime::<Utc>::MIN_UTC);
        assert_eq!(retention_cutoff(at(12, 20), 0), at(12, 20));

        let mut store = MemoryStore::new();
        store
            .create(scraped("old", at(1, 1)), NewsCategory::Accident, candidates(&["438"]), at(1, 1))
            .unwrap();
        let report = store.purge_before(retention_cutoff(at(12, 20), u32::MAX));
        assert_eq!(report, PurgeReport::default());
    }

    #[test]
    fn test_record_rejects_unknown_article() {
        let mut other = MemoryStore::new();
        other
            .create(scraped("a", at(12, 10)), NewsCategory::Accident, candidates(&["438"]), at(12, 10))
            .unwrap();
        let draw = LotteryDraw::new(1, "2024-12-16".parse().unwrap(), "163438").unwrap();
        let matches = collect_matches(&WindowJoiner::default(), &[draw], other.articles());

        let mut store = MemoryStore::new();
        assert!(matches!(store.record(&matches[0]), Err(StoreError::ArticleNotFound(1))));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        assert!(MemoryStore::load(&path).unwrap().articles().is_empty());

        let mut store = MemoryStore::new();
        store
            .create(scraped("a", at(12, 10)), NewsCategory::Politics, candidates(&["304"]), at(12, 10))
            .unwrap();
        store.save(&path).unwrap();

        let mut loaded = MemoryStore::load(&path).unwrap();
        assert_eq!(loaded.articles()[0].candidates[0].number.as_str(), "304");

        let id = loaded
            .create(scraped("b", at(12, 11)), NewsCategory::Politics, vec![], at(12, 11))
            .unwrap();
        assert_eq!(id, 2);
    }
}
