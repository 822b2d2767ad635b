//! News articles and the raw records scrapers hand to the core.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candidate::{Candidate, LotteryNumber};

/// News outlet an article was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsSource {
    Thairath,
    Khaosod,
    Matichon,
}

impl NewsSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thairath => "thairath",
            Self::Khaosod => "khaosod",
            Self::Matichon => "matichon",
        }
    }
}

impl fmt::Display for NewsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topic bucket used to select and label articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsCategory {
    Royal,
    Accident,
    Religion,
    Politics,
    LuckyNumber,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Royal => "royal",
            Self::Accident => "accident",
            Self::Religion => "religion",
            Self::Politics => "politics",
            Self::LuckyNumber => "lucky_number",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record produced by a scraping collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedArticle {
    pub title: String,

    #[serde(alias = "content")]
    pub body: String,

    /// Unique key; duplicates of stored articles are skipped at ingest.
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub published_at: DateTime<Utc>,

    pub source: NewsSource,

    /// Category assigned by the scraper, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<NewsCategory>,
}

impl ScrapedArticle {
    /// Title and body joined the way the extractor reads them.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// A stored article with its candidate numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub source: NewsSource,
    pub category: NewsCategory,
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    pub published_at: DateTime<Utc>,

    /// When the article entered the store; drives retention.
    pub ingested_at: DateTime<Utc>,

    /// Candidates in discovery order, unique by number.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl Article {
    /// Build an article from a scraped record.
    pub fn from_scraped(
        id: u64,
        scraped: ScrapedArticle,
        category: NewsCategory,
        ingested_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: scraped.title,
            body: scraped.body,
            source: scraped.source,
            category,
            url: scraped.url,
            image_url: scraped.image_url,
            published_at: scraped.published_at,
            ingested_at,
            candidates: Vec::new(),
        }
    }

    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }

    pub fn has_number(&self, number: &LotteryNumber) -> bool {
        self.candidates.iter().any(|c| &c.number == number)
    }

    /// Append candidates whose number is not yet attached to this article.
    ///
    /// Returns how many were added.
    pub fn attach_candidates(&mut self, candidates: impl IntoIterator<Item = Candidate>) -> usize {
        let mut added = 0;
        for candidate in candidates {
            if self.has_number(&candidate.number) {
                continue;
            }
            self.candidates.push(candidate);
            added += 1;
        }
        added
    }
}
